//! Muninn error types

/// Muninn error types
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Network-level failure reaching the recommendation service: connection
    /// error, timeout, or a non-success response. The message embeds the
    /// underlying transport cause.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the expected JSON shape (an array of
    /// `[identifier, score]` pairs with numeric-looking identifiers).
    #[error("decode error: {0}")]
    Decode(String),

    /// Neither the cache nor the client produced a well-formed id list.
    /// Carries a serialized rendering of the offending value for diagnostics.
    #[error("expected a list of ids, but got: {0}")]
    UnexpectedResult(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for muninn operations
pub type Result<T> = std::result::Result<T, EngineError>;
