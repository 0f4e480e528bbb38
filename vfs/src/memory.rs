use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// In-memory provider for tests and embedded assets.
///
/// Thread-safe and still mutable after being handed to a loader: clones share
/// the same file table. Every successful [`read`](VfsProvider::read) is
/// counted, which lets tests observe whether a loader hit its cache.
///
/// # Example
///
/// ```
/// use redlilium_vfs::{MemoryProvider, VfsProvider};
///
/// let mem = MemoryProvider::new();
/// mem.insert("models/box.gltf", b"{}".to_vec());
/// assert!(mem.exists("models/box.gltf"));
/// assert_eq!(mem.read_count("models/box.gltf"), 0);
/// ```
#[derive(Clone, Default)]
pub struct MemoryProvider {
    files: Arc<RwLock<HashMap<String, Entry>>>,
}

#[derive(Default)]
struct Entry {
    data: Vec<u8>,
    reads: AtomicUsize,
}

impl MemoryProvider {
    /// Create an empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file at the given path.
    ///
    /// The path should use forward slashes and have no leading slash.
    /// Overwrites any existing file at the same path.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) {
        self.files.write().insert(
            path.into(),
            Entry {
                data,
                reads: AtomicUsize::new(0),
            },
        );
    }

    /// Remove a file at the given path, returning its data if it existed.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files.write().remove(path).map(|entry| entry.data)
    }

    /// Number of successful reads of `path` since it was inserted.
    pub fn read_count(&self, path: &str) -> usize {
        self.files
            .read()
            .get(path)
            .map_or(0, |entry| entry.reads.load(Ordering::Relaxed))
    }
}

impl VfsProvider for MemoryProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let files = self.files.read();
        let entry = files
            .get(path)
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))?;
        entry.reads.fetch_add(1, Ordering::Relaxed);
        Ok(entry.data.clone())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.read().contains_key(path)
    }
}
