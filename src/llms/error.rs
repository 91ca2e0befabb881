use thiserror::Error;

use zc_base::schema::SchemaError;

/// Typed error for analysis provider calls.
///
/// The session never branches on these; they are flattened into one
/// user-facing message at the worker boundary.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Missing or invalid API key
    #[error("Auth error: {0}")]
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(String),
    /// API returned a non-success HTTP status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    /// Response envelope could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
    /// Response decoded but the tree inside is invalid
    #[error("Malformed result: {0}")]
    Schema(#[from] SchemaError),
    /// Provider could not be constructed or read its input
    #[error("Setup error: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::Parse(e.to_string())
        } else {
            LlmError::Network(e.to_string())
        }
    }
}
