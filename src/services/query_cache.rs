// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keyed one-shot fetch cache.
//!
//! A successful result is kept for the life of the process (infinite
//! freshness); errors are never cached, so the next caller fetches again.
//! Concurrent callers for the same key share a single in-flight fetch.

use crate::error::AppError;
use dashmap::DashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-key fetch locks.
type FetchLocks<K> = Arc<DashMap<K, Arc<Mutex<()>>>>;

/// Cache of fetch results keyed by id.
pub struct QueryCache<K, V> {
    entries: Arc<DashMap<K, Arc<V>>>,
    locks: FetchLocks<K>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            locks: self.locks.clone(),
        }
    }
}

impl<K, V> Default for QueryCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            locks: Arc::new(DashMap::new()),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `fetch` once and cache it.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<Arc<V>, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>>,
    {
        // Fast path: no locking beyond the shard read.
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.clone());
        }

        let lock = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // Another caller may have filled it while we waited.
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.clone());
        }

        tracing::debug!(key = ?key, "Query cache miss");
        let value = Arc::new(fetch().await?);
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|v| v.clone())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
