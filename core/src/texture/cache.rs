//! Texture cache keyed by resolved source path.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Texture;

/// Cache of decoded textures keyed by their resolved source path.
///
/// The cache owns the canonical `Arc<Texture>` for each key; materials hold
/// clones of that handle. A cache can live inside a single load (the default)
/// or be shared between loads running on different threads.
///
/// # Locking
///
/// [`get_or_try_insert_with`](Self::get_or_try_insert_with) never decodes
/// while holding the lock: it checks under the lock, releases it, runs the
/// loader, then re-locks and inserts only if no other thread got there first.
/// When two threads race on the same key, both may decode, but only the first
/// insertion is kept and both callers receive that same instance.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: Mutex<HashMap<String, Arc<Texture>>>,
}

impl TextureCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached texture.
    pub fn get(&self, key: &str) -> Option<Arc<Texture>> {
        self.entries.lock().get(key).cloned()
    }

    /// Whether `key` is cached.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Return the cached texture for `key`, or run `load` and cache its result.
    ///
    /// Errors from `load` are returned as-is and nothing is cached, so a later
    /// call retries.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: &str,
        load: impl FnOnce() -> Result<Texture, E>,
    ) -> Result<Arc<Texture>, E> {
        if let Some(existing) = self.get(key) {
            log::debug!("texture cache hit: {key}");
            return Ok(existing);
        }

        let texture = Arc::new(load()?);

        let mut entries = self.entries.lock();
        let entry = entries
            .entry(key.to_owned())
            .or_insert_with(|| Arc::clone(&texture));
        Ok(Arc::clone(entry))
    }

    /// Number of cached textures.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every cached handle. Textures still referenced by models survive.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
