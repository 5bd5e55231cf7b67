//! Test double returning random ids instead of calling a remote service.

use std::ops::RangeInclusive;

use async_trait::async_trait;

use super::RecommendClient;
use crate::Result;

/// Client that picks `limit` distinct random ids from a fixed range.
///
/// Useful for development and staging environments where no recommendation
/// service is reachable but pages still need plausible results.
#[derive(Debug)]
pub struct RandomClient {
    range: RangeInclusive<u64>,
}

impl RandomClient {
    /// Create a client picking ids from `from..=to`.
    pub fn new(from: u64, to: u64) -> Self {
        Self { range: from..=to }
    }

    fn pick(&self, limit: usize) -> Vec<u64> {
        let start = *self.range.start();
        let end = *self.range.end();
        let len = (end - start + 1) as usize;

        let mut rng = rand::rng();
        rand::seq::index::sample(&mut rng, len, limit.min(len))
            .into_iter()
            .map(|offset| start + offset as u64)
            .collect()
    }
}

impl Default for RandomClient {
    fn default() -> Self {
        Self::new(1, 100_000)
    }
}

#[async_trait]
impl RecommendClient for RandomClient {
    fn name(&self) -> &str {
        "random"
    }

    async fn recommend(&self, _object_id: u64, limit: usize) -> Result<Vec<u64>> {
        Ok(self.pick(limit))
    }

    async fn popularity(&self, _category: &str, limit: usize) -> Result<Vec<u64>> {
        Ok(self.pick(limit))
    }
}
