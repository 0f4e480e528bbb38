use crate::VfsError;

/// Trait for read-only asset storage backends.
///
/// The model loader reads the source document, external buffers and
/// file-referenced images through this trait. All calls are blocking; a
/// caller wanting asynchronous loading wraps the whole load in its own task.
///
/// # Path Contract
///
/// Paths are normalized by [`path::normalize`](crate::path::normalize) before
/// they reach a provider: forward slashes, no leading/trailing slashes, no
/// `.` or `..` segments. The path is relative to the provider's root.
pub trait VfsProvider: Send + Sync + 'static {
    /// Read the entire contents of a file at the given path.
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Check whether a file exists at the given path.
    fn exists(&self, path: &str) -> bool;
}

impl<P: VfsProvider + ?Sized> VfsProvider for std::sync::Arc<P> {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        (**self).read(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}
