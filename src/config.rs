//! Configuration loading and engine wiring.
//!
//! Configuration is TOML:
//!
//! ```toml
//! [engine]
//! type = "otrslso"        # or "random"
//! ttl_secs = 300          # 0 = cache forever
//! throw_errors = false
//!
//! [engine.otrslso]
//! endpoint = "https://api.otrslso.com"
//! site_id = 12345         # required for the otrslso engine
//! timeout_secs = 1
//!
//! [cache]
//! max_entries = 10000
//! ```
//!
//! Which client implementation backs the engine is a construction-time
//! choice made in [`build_engine`]; nothing is looked up dynamically.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::MemoryCache;
use crate::client::{OtrslsoClient, RandomClient, RecommendClient};
use crate::engine::Engine;
use crate::{EngineError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| EngineError::Configuration(format!("failed to parse config: {e}")))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }
}

/// Supported engine implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    #[default]
    Otrslso,
    Random,
}

/// Engine behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Which client implementation to use (default: otrslso).
    #[serde(rename = "type", default)]
    pub engine_type: EngineType,
    /// Time-to-live for cached results in seconds; 0 caches forever
    /// (default: 300).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Propagate client failures instead of returning empty lists
    /// (default: false).
    #[serde(default)]
    pub throw_errors: bool,
    /// Otrslso client settings; required when `type = "otrslso"`.
    #[serde(default)]
    pub otrslso: Option<OtrslsoConfig>,
    #[serde(default)]
    pub random: RandomConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_type: EngineType::default(),
            ttl_secs: default_ttl_secs(),
            throw_errors: false,
            otrslso: None,
            random: RandomConfig::default(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

/// Otrslso client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OtrslsoConfig {
    /// Base URL of the Otrslso API (default: `https://api.otrslso.com`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Site id sent as the `c` query parameter on every request.
    pub site_id: u64,
    /// Request timeout in seconds. Should stay low to prevent long waits
    /// when the service is unresponsive (default: 1).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.otrslso.com".to_string()
}

fn default_timeout_secs() -> u64 {
    1
}

/// Random test-double client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomConfig {
    /// Lowest id the client may return (default: 1).
    #[serde(default = "default_random_from")]
    pub from: u64,
    /// Highest id the client may return (default: 100000).
    #[serde(default = "default_random_to")]
    pub to: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            from: default_random_from(),
            to: default_random_to(),
        }
    }
}

fn default_random_from() -> u64 {
    1
}

fn default_random_to() -> u64 {
    100_000
}

/// Cache sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached entries (default: 10000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> u64 {
    10_000
}

/// Construct the configured client implementation.
pub fn build_client(config: &Config) -> Result<Arc<dyn RecommendClient>> {
    match config.engine.engine_type {
        EngineType::Otrslso => {
            let otrslso = config.engine.otrslso.as_ref().ok_or_else(|| {
                EngineError::Configuration(
                    "engine.otrslso.site_id is required for the otrslso engine".to_string(),
                )
            })?;
            let client = OtrslsoClient::with_endpoint(
                &otrslso.endpoint,
                otrslso.site_id,
                Duration::from_secs(otrslso.timeout_secs),
            )?;
            Ok(Arc::new(client))
        }
        EngineType::Random => {
            let random = &config.engine.random;
            if random.from > random.to {
                return Err(EngineError::Configuration(format!(
                    "engine.random range is empty: {}..={}",
                    random.from, random.to
                )));
            }
            Ok(Arc::new(RandomClient::new(random.from, random.to)))
        }
    }
}

/// Wire up a ready-to-use engine: configured client, bundled in-memory
/// cache, TTL, and error policy.
pub fn build_engine(config: &Config) -> Result<Engine> {
    let client = build_client(config)?;
    let cache = Arc::new(MemoryCache::new(config.cache.max_entries));

    let mut engine = Engine::new(client, cache);
    engine.set_ttl(Duration::from_secs(config.engine.ttl_secs));
    engine.set_throw_errors(config.engine.throw_errors);

    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.engine.engine_type, EngineType::Otrslso);
        assert_eq!(config.engine.ttl_secs, 300);
        assert!(!config.engine.throw_errors);
        assert_eq!(config.cache.max_entries, 10_000);
    }

    #[test]
    fn full_otrslso_config_parses() {
        let config = Config::from_toml(
            r#"
            [engine]
            type = "otrslso"
            ttl_secs = 3600
            throw_errors = true

            [engine.otrslso]
            site_id = 42
            timeout_secs = 2

            [cache]
            max_entries = 500
            "#,
        )
        .unwrap();

        let otrslso = config.engine.otrslso.as_ref().unwrap();
        assert_eq!(otrslso.site_id, 42);
        assert_eq!(otrslso.endpoint, "https://api.otrslso.com");
        assert_eq!(otrslso.timeout_secs, 2);
        assert_eq!(config.engine.ttl_secs, 3600);
        assert!(config.engine.throw_errors);
        assert_eq!(config.cache.max_entries, 500);
    }

    #[test]
    fn unknown_engine_type_is_rejected() {
        let result = Config::from_toml("[engine]\ntype = \"spotlight\"");
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }

    #[test]
    fn otrslso_without_site_id_fails_at_build() {
        let config = Config::from_toml("[engine]\ntype = \"otrslso\"").unwrap();
        let err = build_client(&config).unwrap_err();
        assert!(err.to_string().contains("site_id"));
    }

    #[test]
    fn random_engine_builds_without_site_id() {
        let config = Config::from_toml("[engine]\ntype = \"random\"").unwrap();
        let client = build_client(&config).unwrap();
        assert_eq!(client.name(), "random");
    }

    #[test]
    fn random_range_validation() {
        let config = Config::from_toml(
            r#"
            [engine]
            type = "random"

            [engine.random]
            from = 10
            to = 5
            "#,
        )
        .unwrap();
        assert!(build_client(&config).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("muninn.toml");
        std::fs::write(&path, "[engine.otrslso]\nsite_id = 7\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.engine.otrslso.unwrap().site_id, 7);
    }

    #[test]
    fn load_missing_file_is_configuration_error() {
        let result = Config::load("/nonexistent/muninn.toml");
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }
}
