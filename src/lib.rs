//! Muninn - caching gateway for remote recommendation engines
//!
//! This crate relays ranked object ids from a remote recommendation
//! service, with a cache in front so repeated lookups never hit the
//! network. The [`Engine`] exposes `recommend` and `popularity`; the
//! [`RecommendClient`] trait abstracts the actual service so test doubles
//! can be substituted without touching the engine.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use muninn::{Engine, MemoryCache, OtrslsoClient};
//!
//! #[tokio::main]
//! async fn main() -> muninn::Result<()> {
//!     let client = Arc::new(OtrslsoClient::new(12345)?);
//!     let engine = Engine::new(client, Arc::new(MemoryCache::default()));
//!
//!     // Cached for 300 s; a second identical call is answered locally.
//!     let ids = engine.recommend(1234, 10).await?;
//!     println!("{ids:?}");
//!     Ok(())
//! }
//! ```
//!
//! # Error policy
//!
//! By default client failures are logged and swallowed: `recommend` and
//! `popularity` return an empty list so a flaky recommendation service
//! never breaks a page render. Enable [`Engine::set_throw_errors`] for
//! strict failure visibility.

pub mod cache;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;

// Re-export main types at crate root
pub use cache::{CacheStore, MemoryCache};
pub use client::{OtrslsoClient, RandomClient, RecommendClient};
pub use config::{Config, EngineType, build_client, build_engine};
pub use engine::{DEFAULT_LIMIT, Engine};
pub use error::{EngineError, Result};
pub use telemetry::{EngineLogger, NoopLogger, TracingLogger};
