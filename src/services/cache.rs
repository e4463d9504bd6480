// src/services/cache.rs

//! In-memory response cache with a fixed time-to-live.
//!
//! Entries older than the TTL are purged on every access. When the cache
//! holds more than `max_entries`, the oldest entries are evicted first.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::models::CacheConfig;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Thread-safe TTL cache keyed by request digest.
#[derive(Debug)]
pub struct ResponseCache<V> {
    ttl: Duration,
    max_entries: usize,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_limits(config.ttl(), config.max_entries)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Derive a cache key from any serializable request description.
    pub fn key<K: Serialize + ?Sized>(request: &K) -> Result<String> {
        let bytes = serde_json::to_vec(request)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    /// Look up a fresh entry.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store a value, evicting expired and then oldest entries.
    pub fn insert(&self, key: String, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut entries = self.lock();
        self.purge(&mut entries, now);
        entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    fn insert_at(&self, key: String, value: V, now: Instant) {
        let mut entries = self.lock();
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
        self.purge(&mut entries, now);
    }

    fn purge(&self, entries: &mut HashMap<String, CacheEntry<V>>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.stored_at) < self.ttl);

        if entries.len() > self.max_entries {
            let mut by_age: Vec<(String, Instant)> = entries
                .iter()
                .map(|(k, e)| (k.clone(), e.stored_at))
                .collect();
            by_age.sort_by_key(|(_, stored_at)| *stored_at);

            let excess = entries.len() - self.max_entries;
            for (key, _) in by_age.into_iter().take(excess) {
                entries.remove(&key);
            }
        }

        let removed = before - entries.len();
        if removed > 0 {
            log::debug!("Cache purge removed {} entries, {} left", removed, entries.len());
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
