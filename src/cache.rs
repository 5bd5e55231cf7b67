//! Cache collaborator for recommendation results.
//!
//! The engine talks to its cache through [`CacheStore`], a minimal get/set
//! interface with a per-entry TTL. Values are untyped [`serde_json::Value`]s:
//! externally managed stores (redis, memcached wrappers, ...) may hold
//! arbitrary or stale data, and the engine validates leniently on read —
//! anything that is not a well-formed id list counts as a miss.
//!
//! [`MemoryCache`] is the bundled in-memory implementation, backed by moka.
//! It exists so the crate works out of the box; the trait is the boundary
//! when a shared backend is needed.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use serde_json::Value;

/// Key-value store with per-entry time-to-live.
///
/// A `ttl` of [`Duration::ZERO`] means the entry never expires; the store
/// defines exact expiry semantics beyond that.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a value. Returns `None` when absent or expired.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store a value under `key` for `ttl` (`Duration::ZERO` = no expiry).
    async fn set(&self, key: &str, value: Value, ttl: Duration);
}

/// Cached entry carrying its own TTL, so one cache instance can hold
/// entries written under different engine TTL settings.
#[derive(Clone)]
struct Entry {
    value: Value,
    ttl: Option<Duration>,
}

struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _now: Instant) -> Option<Duration> {
        // None = never expire (entries written with a zero TTL)
        entry.ttl
    }
}

/// In-memory cache backed by `moka::future::Cache`, bounded by entry count.
pub struct MemoryCache {
    inner: Cache<String, Entry>,
}

impl MemoryCache {
    /// Create a cache holding at most `max_entries` entries.
    pub fn new(max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryExpiry)
            .build();
        Self { inner }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).await.map(|entry| entry.value)
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        let ttl = (!ttl.is_zero()).then_some(ttl);
        self.inner.insert(key.to_string(), Entry { value, ttl }).await;
    }
}
