//! Recommendation service clients.
//!
//! [`RecommendClient`] is the polymorphic capability the engine is built
//! against: one remote HTTP implementation ([`OtrslsoClient`]) and one
//! deterministic-shape test double ([`RandomClient`]). Which implementation
//! is used is a construction-time choice (see [`crate::config`]); the engine
//! never inspects the concrete type.

use async_trait::async_trait;

use crate::Result;

mod otrslso;
mod random;

pub use otrslso::OtrslsoClient;
pub use random::RandomClient;

/// Client capability for fetching ranked object ids.
///
/// Implementations surface every failure as an [`EngineError`]
/// (`crate::EngineError`); swallowing errors is the engine's job, not the
/// client's.
#[async_trait]
pub trait RecommendClient: Send + Sync + std::fmt::Debug {
    /// Client name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch ids recommended for the given object, best match first,
    /// at most `limit` entries.
    async fn recommend(&self, object_id: u64, limit: usize) -> Result<Vec<u64>>;

    /// Fetch the most popular ids within a category, most popular first,
    /// at most `limit` entries.
    async fn popularity(&self, category: &str, limit: usize) -> Result<Vec<u64>>;
}
