//! The caching engine: cache-first `recommend`/`popularity` with a
//! configurable error policy.
//!
//! # Architecture
//!
//! The engine sits between the caller and a [`RecommendClient`], with a
//! [`CacheStore`] in front of the client. A well-formed cached list
//! short-circuits the remote call entirely. On a miss the client result is
//! written back under the same key with the engine's TTL.
//!
//! # Error policy
//!
//! Every client failure is logged exactly once, with the originating method
//! and subject as context. By default the error is then swallowed and an
//! empty list is returned, so a flaky recommendation service never breaks a
//! page render. Callers that need strict failure visibility enable
//! [`Engine::set_throw_errors`].
//!
//! # Concurrency
//!
//! No internal locking. The engine is safe to share across tasks if the
//! cache and client are, but two concurrent misses for the same key will
//! both hit the remote service and both write the cache (last write wins).
//! There is no stampede protection; this is a documented limitation.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::CacheStore;
use crate::client::RecommendClient;
use crate::telemetry::{self, EngineLogger, TracingLogger};
use crate::{EngineError, Result};

/// Limit used when callers have no preference of their own.
pub const DEFAULT_LIMIT: usize = 10;

/// Default time-to-live for cached results. Results change frequently with
/// page visits, so this is deliberately short.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Caching front for a recommendation client.
pub struct Engine {
    client: Arc<dyn RecommendClient>,
    cache: Arc<dyn CacheStore>,
    logger: Arc<dyn EngineLogger>,
    ttl: Duration,
    throw_errors: bool,
}

impl Engine {
    /// Create an engine with the default TTL (300 s), swallow-errors policy,
    /// and `tracing`-backed logging.
    pub fn new(client: Arc<dyn RecommendClient>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            client,
            cache,
            logger: Arc::new(TracingLogger),
            ttl: DEFAULT_TTL,
            throw_errors: false,
        }
    }

    /// Replace the logging sink.
    pub fn with_logger(mut self, logger: Arc<dyn EngineLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Change the time-to-live for cached results.
    ///
    /// A zero duration caches indefinitely. Not recommended: results may
    /// change frequently, depending on page visits.
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }

    /// When enabled, client failures propagate to the caller after logging
    /// instead of being swallowed into an empty list.
    pub fn set_throw_errors(&mut self, throw_errors: bool) {
        self.throw_errors = throw_errors;
    }

    /// Ids recommended for `object_id`, best match first, at most `limit`.
    pub async fn recommend(&self, object_id: u64, limit: usize) -> Result<Vec<u64>> {
        metrics::counter!(telemetry::REQUESTS_TOTAL, "operation" => "recommend").increment(1);

        let key = cache_key("recommend", object_id, limit);
        let result = self
            .fetch_cached("recommend", &key, || self.client.recommend(object_id, limit))
            .await;

        self.finish("recommend", &object_id.to_string(), result)
    }

    /// Most popular ids within `category`, most popular first, at most `limit`.
    pub async fn popularity(&self, category: &str, limit: usize) -> Result<Vec<u64>> {
        metrics::counter!(telemetry::REQUESTS_TOTAL, "operation" => "popularity").increment(1);

        let key = cache_key("popularity", category, limit);
        let result = self
            .fetch_cached("popularity", &key, || self.client.popularity(category, limit))
            .await;

        self.finish("popularity", category, result)
    }

    /// Cache-first fetch: a well-formed cached list is returned as-is; a
    /// missing or malformed entry triggers `compute`, whose result is cached
    /// before returning. Only well-formed lists are ever written back.
    async fn fetch_cached<F, Fut>(
        &self,
        operation: &'static str,
        key: &str,
        compute: F,
    ) -> Result<Vec<u64>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u64>>>,
    {
        if let Some(cached) = self.cache.get(key).await {
            if let Some(ids) = as_id_list(&cached) {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => operation)
                    .increment(1);
                return Ok(ids);
            }
            // present but not a valid id list: treat as a miss
            debug!(key, "ignoring malformed cache entry");
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => operation).increment(1);

        let value = Value::from(compute().await?);
        match as_id_list(&value) {
            Some(ids) => {
                self.cache.set(key, value, self.ttl).await;
                Ok(ids)
            }
            None => Err(EngineError::UnexpectedResult(value.to_string())),
        }
    }

    /// Apply the error policy: log once, then swallow or propagate.
    fn finish(
        &self,
        method: &'static str,
        subject: &str,
        result: Result<Vec<u64>>,
    ) -> Result<Vec<u64>> {
        match result {
            Ok(ids) => Ok(ids),
            Err(e) => {
                metrics::counter!(telemetry::ERRORS_TOTAL, "operation" => method).increment(1);
                self.logger.error(&e.to_string(), method, subject);

                if self.throw_errors {
                    Err(e)
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }
}

/// Deterministic cache key for an (operation, subject, limit) triple.
fn cache_key(kind: &str, subject: impl Display, limit: usize) -> String {
    format!("{kind}_{subject}_{limit}")
}

/// Validate a cached or computed value as a list of ids.
fn as_id_list(value: &Value) -> Option<Vec<u64>> {
    value.as_array()?.iter().map(Value::as_u64).collect()
}
