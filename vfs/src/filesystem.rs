use std::path::{Path, PathBuf};

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// File system provider for reading assets from disk.
///
/// The root path is joined with the (already normalized) provider path to
/// form the actual filesystem path. Path traversal out of the root is
/// prevented by [`path::normalize`](crate::path::normalize), which rejects
/// paths whose `..` segments climb above the root.
///
/// # Example
///
/// ```ignore
/// let provider = FileSystemProvider::new("./assets");
/// // Reads ./assets/textures/brick.png
/// let bytes = provider.read("textures/brick.png")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemProvider {
    root: PathBuf,
}

impl FileSystemProvider {
    /// Create a provider rooted at the given directory.
    ///
    /// The directory does not need to exist yet; it is checked at read time.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this provider reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl VfsProvider for FileSystemProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let full_path = self.resolve(path);
        log::trace!("reading {}", full_path.display());
        std::fs::read(&full_path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                VfsError::NotFound(full_path.display().to_string())
            } else {
                VfsError::Io(err)
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}
