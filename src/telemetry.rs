//! Telemetry: metric name constants and the engine's logging seam.
//!
//! Metric names are centralised here. Consumers install their own `metrics`
//! recorder (e.g. prometheus, statsd); without a recorder installed, all
//! metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `operation` — engine method invoked ("recommend" | "popularity")

/// Total requests answered by the engine, hit or miss.
///
/// Labels: `operation`.
pub const REQUESTS_TOTAL: &str = "muninn_requests_total";

/// Total cache hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "muninn_cache_hits_total";

/// Total cache misses (including malformed entries treated as misses).
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "muninn_cache_misses_total";

/// Total client failures seen by the engine, before the error policy
/// decides whether to swallow or propagate.
///
/// Labels: `operation`.
pub const ERRORS_TOTAL: &str = "muninn_errors_total";

/// Logging seam for the engine.
///
/// The engine logs every client failure exactly once through this trait,
/// regardless of whether the error is then swallowed or propagated.
/// Injected at construction so tests can capture log calls; implementations
/// must never panic or block.
pub trait EngineLogger: Send + Sync {
    /// Record an error-severity event with the originating engine method
    /// and the subject (object id or category) it was called with.
    fn error(&self, message: &str, method: &'static str, subject: &str);
}

/// Default logger: forwards to [`tracing::error!`] with structured fields.
pub struct TracingLogger;

impl EngineLogger for TracingLogger {
    fn error(&self, message: &str, method: &'static str, subject: &str) {
        tracing::error!(method, subject, "{message}");
    }
}

/// Logger that discards everything. Never throws, never blocks.
pub struct NoopLogger;

impl EngineLogger for NoopLogger {
    fn error(&self, _message: &str, _method: &'static str, _subject: &str) {}
}
