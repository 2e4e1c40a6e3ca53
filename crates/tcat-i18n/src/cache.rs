//! Bounded LRU cache of resolved messages and its resize policy

use crate::error::{CatalogError, CatalogResult};
use crate::message::Message;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// Capacity of a cache built from the default [`ResizePolicy`].
pub const DEFAULT_INITIAL_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => panic!("default cache capacity must be non-zero"),
};

/// Recency-ordered cache mapping flat keys to shared messages.
///
/// `len() <= cap()` holds after every operation.
pub struct MessageCache {
    inner: LruCache<String, Arc<Message>>,
}

impl MessageCache {
    /// Create a cache holding at most `capacity` messages.
    pub fn new(capacity: usize) -> CatalogResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CatalogError::InvalidCapacity)?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a cache with an already validated capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            inner: LruCache::new(capacity),
        }
    }

    /// Look up `key`, promoting it to most recently used.
    pub fn get(&mut self, key: &str) -> Option<Arc<Message>> {
        self.inner.get(key).cloned()
    }

    /// Insert or replace `key`, promoting it and evicting the least recently
    /// used entry when the cache is full.
    pub fn put(&mut self, key: impl Into<String>, message: Arc<Message>) {
        self.inner.put(key.into(), message);
    }

    /// Remove `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.inner.pop(key).is_some()
    }

    /// Change the capacity, evicting least recently used entries until the
    /// cache fits.
    pub fn resize(&mut self, capacity: usize) -> CatalogResult<()> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CatalogError::InvalidCapacity)?;
        if capacity != self.inner.cap() {
            debug!(from = self.inner.cap().get(), to = capacity.get(), "resizing message cache");
            self.inner.resize(capacity);
        }
        Ok(())
    }

    /// Number of cached messages
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Maximum number of cached messages
    pub fn cap(&self) -> usize {
        self.inner.cap().get()
    }

    /// Whether the cache holds no messages
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether `key` is cached. Does not affect recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    /// Cached keys, most recently used first.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<String> {
        self.inner.iter().map(|(key, _)| key.clone()).collect()
    }
}

impl fmt::Debug for MessageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageCache")
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}

/// How the cache capacity follows the catalog size.
///
/// Applied once per invalidation sweep with `total` catalog entries: small
/// catalogs resize to `total / small_divisor` only when that reaches
/// `min_capacity`; large catalogs always resize to `total / large_divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizePolicy {
    /// Capacity of a freshly created cache
    pub initial_capacity: usize,
    /// Largest catalog size still treated as small
    pub small_catalog_limit: usize,
    /// Divisor applied to small catalogs
    pub small_divisor: usize,
    /// Divisor applied to large catalogs
    pub large_divisor: usize,
    /// Smallest capacity a small catalog may resize to
    pub min_capacity: usize,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY.get(),
            small_catalog_limit: 1024,
            small_divisor: 3,
            large_divisor: 4,
            min_capacity: 64,
        }
    }
}

impl ResizePolicy {
    /// The capacity to resize to for a catalog of `total` entries, or `None`
    /// to keep the current capacity.
    pub fn target_capacity(&self, total: usize) -> Option<NonZeroUsize> {
        if total <= self.small_catalog_limit {
            let target = total.checked_div(self.small_divisor)?;
            if target >= self.min_capacity {
                NonZeroUsize::new(target)
            } else {
                None
            }
        } else {
            total.checked_div(self.large_divisor).and_then(NonZeroUsize::new)
        }
    }

    /// Build an empty cache at the initial capacity.
    pub fn new_cache(&self) -> CatalogResult<MessageCache> {
        MessageCache::new(self.initial_capacity)
    }

    /// Resize `cache` for a catalog of `total` entries.
    pub fn apply(&self, cache: &mut MessageCache, total: usize) -> CatalogResult<()> {
        match self.target_capacity(total) {
            Some(capacity) => cache.resize(capacity.get()),
            None => Ok(()),
        }
    }
}
