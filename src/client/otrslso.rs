//! Client for the Otrslso recommendation engine.
//!
//! The engine speaks a small GET-based API:
//! `GET {endpoint}/{recommend|popularity}?c={site_id}&{i|cat}={subject}`,
//! answering with a JSON array of `[identifier, score]` pairs ordered by
//! relevance. Identifiers may arrive as strings or numbers; scores are
//! present in the wire format but unused here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::RecommendClient;
use crate::{EngineError, Result};

/// Default base URL for the Otrslso API.
const DEFAULT_ENDPOINT: &str = "https://api.otrslso.com";

/// Default request timeout. Kept low so an unresponsive recommendation
/// service cannot stall a page render for long.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// HTTP client for the Otrslso recommendation engine.
#[derive(Clone, Debug)]
pub struct OtrslsoClient {
    http: Client,
    endpoint: String,
    site_id: u64,
}

impl OtrslsoClient {
    /// Create a client against the default endpoint with the default
    /// 1 second timeout.
    pub fn new(site_id: u64) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, site_id, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom endpoint and timeout (also used for
    /// testing with wiremock).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        site_id: u64,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let endpoint = endpoint.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            endpoint,
            site_id,
        })
    }

    /// Issue a GET to `{endpoint}/{path}` with the subject query parameter
    /// plus the fixed site identifier, returning the raw response body.
    async fn request(&self, path: &str, subject: (&str, String)) -> Result<String> {
        let url = format!("{}/{}", self.endpoint, path);
        let query = [subject, ("c", self.site_id.to_string())];

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Transport(format!(
                "engine returned HTTP {status} for {path}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))
    }
}

#[async_trait]
impl RecommendClient for OtrslsoClient {
    fn name(&self) -> &str {
        "otrslso"
    }

    async fn recommend(&self, object_id: u64, limit: usize) -> Result<Vec<u64>> {
        let body = self.request("recommend", ("i", object_id.to_string())).await?;

        parse_response(&body, limit)
    }

    async fn popularity(&self, category: &str, limit: usize) -> Result<Vec<u64>> {
        let body = self
            .request("popularity", ("cat", category.to_string()))
            .await?;

        parse_response(&body, limit)
    }
}

/// Parse an engine response body into at most `limit` object ids.
///
/// Truncation happens before identifier coercion, so a malformed entry
/// beyond the limit never surfaces as an error.
fn parse_response(body: &str, limit: usize) -> Result<Vec<u64>> {
    let entries: Vec<(Value, Value)> = serde_json::from_str(body)
        .map_err(|e| EngineError::Decode(format!("could not decode engine response: {e}")))?;

    entries
        .iter()
        .take(limit)
        .map(|(id, _score)| coerce_id(id))
        .collect()
}

/// Convert a single identifier value to an integer id.
///
/// The engine historically returned ids as strings; numbers are accepted
/// too. Anything else is a decode failure.
fn coerce_id(value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| EngineError::Decode(format!("identifier out of range: {n}"))),
        Value::String(s) => s
            .parse()
            .map_err(|_| EngineError::Decode(format!("non-numeric identifier: {s:?}"))),
        other => Err(EngineError::Decode(format!(
            "unexpected identifier type: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_string_ids_with_scores() {
        let ids = parse_response(r#"[["123",4],["456",2],["789",9]]"#, 10).unwrap();
        assert_eq!(ids, vec![123, 456, 789]);
    }

    #[test]
    fn parse_truncates_to_limit() {
        let ids = parse_response(r#"[["123",4],["456",2],["789",9]]"#, 2).unwrap();
        assert_eq!(ids, vec![123, 456]);
    }

    #[test]
    fn parse_limit_zero_is_empty() {
        let ids = parse_response(r#"[["123",4]]"#, 0).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn parse_shorter_than_limit_returns_all() {
        let ids = parse_response(r#"[["123",4],["456",2]]"#, 10).unwrap();
        assert_eq!(ids, vec![123, 456]);
    }

    #[test]
    fn parse_numeric_ids() {
        let ids = parse_response(r#"[[123, 0.5], [456, 0.1]]"#, 10).unwrap();
        assert_eq!(ids, vec![123, 456]);
    }

    #[test]
    fn parse_malformed_json_is_decode_error() {
        let err = parse_response("{some_invalid_json}", 10).unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn parse_wrong_top_level_shape_is_decode_error() {
        let err = parse_response(r#"{"ids": [1, 2]}"#, 10).unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn parse_non_numeric_identifier_is_decode_error() {
        let err = parse_response(r#"[["abc", 1]]"#, 10).unwrap_err();
        match err {
            EngineError::Decode(msg) => assert!(msg.contains("abc")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn parse_malformed_entry_beyond_limit_is_ignored() {
        let ids = parse_response(r#"[["123",4],["oops",1]]"#, 1).unwrap();
        assert_eq!(ids, vec![123]);
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client =
            OtrslsoClient::with_endpoint("https://api.example.com/", 1, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.endpoint, "https://api.example.com");
    }
}
