//! Injectable Cache Stores
//!
//! Schema and pre-value lookups go through a [`CacheStore`] with
//! get-or-compute semantics instead of a process-wide static cache. Hosts
//! share one store across materializations; tests inject a fresh one.
//!
//! # Concurrency
//!
//! Stores are safe for concurrent use. The compute function runs outside the
//! lock, so two threads missing on the same key may both compute; the last
//! writer wins. Computed values are derived from identical lookups, so either
//! result is correct.
//!
//! # Implementations
//!
//! - [`InMemoryCacheStore`] - unbounded, entries live until removed
//! - [`LruCacheStore`] - bounded by entry count, least recently used evicted first

use crate::services::error::Result;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

/// Cache statistics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Keyed cache with get-or-compute semantics
///
/// `None` results from `compute` are returned but never stored, so a type
/// created after a failed lookup is found on the next call.
pub trait CacheStore<V>: Send + Sync {
    fn get_or_compute(
        &self,
        key: &str,
        compute: &mut dyn FnMut() -> Result<Option<V>>,
    ) -> Result<Option<V>>;

    fn get(&self, key: &str) -> Option<V>;

    /// Store `value` unless `key` is already present
    ///
    /// Returns whether the value was stored. Hit/miss counters are untouched.
    fn insert_if_absent(&self, key: &str, value: V) -> bool;

    /// Remove one entry, returning whether it existed
    fn remove(&self, key: &str) -> bool;

    fn clear(&self);

    fn stats(&self) -> CacheStats;
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Counters {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self, entries: usize) -> CacheStats {
        CacheStats {
            entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Unbounded in-memory cache store
#[derive(Debug)]
pub struct InMemoryCacheStore<V> {
    entries: RwLock<HashMap<String, V>>,
    counters: Counters,
}

impl<V> InMemoryCacheStore<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            counters: Counters::default(),
        }
    }
}

impl<V> Default for InMemoryCacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> CacheStore<V> for InMemoryCacheStore<V> {
    fn get_or_compute(
        &self,
        key: &str,
        compute: &mut dyn FnMut() -> Result<Option<V>>,
    ) -> Result<Option<V>> {
        if let Some(cached) = self.get(key) {
            self.counters.hit();
            return Ok(Some(cached));
        }

        self.counters.miss();
        let computed = compute()?;
        if let Some(value) = &computed {
            let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
            entries.insert(key.to_string(), value.clone());
        }
        Ok(computed)
    }

    fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries.get(key).cloned()
    }

    fn insert_if_absent(&self, key: &str, value: V) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        if entries.contains_key(key) {
            return false;
        }
        entries.insert(key.to_string(), value);
        true
    }

    fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.remove(key).is_some()
    }

    fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.clear();
    }

    fn stats(&self) -> CacheStats {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        self.counters.snapshot(entries.len())
    }
}

/// Bounded cache store with least-recently-used eviction
pub struct LruCacheStore<V> {
    entries: Mutex<LruCache<String, V>>,
    counters: Counters,
}

impl<V> LruCacheStore<V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            counters: Counters::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.cap().get()
    }
}

impl<V: Clone + Send + Sync> CacheStore<V> for LruCacheStore<V> {
    fn get_or_compute(
        &self,
        key: &str,
        compute: &mut dyn FnMut() -> Result<Option<V>>,
    ) -> Result<Option<V>> {
        if let Some(cached) = self.get(key) {
            self.counters.hit();
            return Ok(Some(cached));
        }

        self.counters.miss();
        let computed = compute()?;
        if let Some(value) = &computed {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            entries.put(key.to_string(), value.clone());
        }
        Ok(computed)
    }

    fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.get(key).cloned()
    }

    fn insert_if_absent(&self, key: &str, value: V) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        if entries.contains(key) {
            return false;
        }
        entries.put(key.to_string(), value);
        true
    }

    fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.pop(key).is_some()
    }

    fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.clear();
    }

    fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        self.counters.snapshot(entries.len())
    }
}
