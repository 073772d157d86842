//! Memoization of finished analyses.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::data::{AnalysisResult, CommitRecord};

/// Default number of analyses kept in memory.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Bounded LRU cache of analysis results.
///
/// Keys are derived from the commit hash and message only, so two commits
/// from different repositories that share both collide on purpose.
pub struct AnalysisCache {
    entries: Mutex<LruCache<String, AnalysisResult>>,
    capacity: NonZeroUsize,
}

impl AnalysisCache {
    /// Creates a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity,
        }
    }

    /// Computes the cache key for a record.
    pub fn key_for(record: &CommitRecord) -> String {
        let mut hasher = Sha256::new();
        hasher.update(record.commit_hash.as_bytes());
        hasher.update(record.commit_message.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Returns a copy of the cached result and marks it recently used.
    pub fn get(&self, key: &str) -> Option<AnalysisResult> {
        self.lock().get(key).cloned()
    }

    /// Stores a result, evicting the least recently used entry when full.
    pub fn insert(&self, key: String, result: AnalysisResult) {
        if let Some((evicted, _)) = self.lock().push(key.clone(), result) {
            if evicted != key {
                tracing::debug!(key = %evicted, "Evicted least recently used analysis");
            }
        }
    }

    /// Removes every entry and returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Number of cached analyses.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    // Entries are immutable once inserted, so a panic elsewhere while the
    // lock was held cannot leave a half-written value behind.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, AnalysisResult>> {
        self.entries.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!("Analysis cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
