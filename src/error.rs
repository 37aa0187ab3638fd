//! Error types for the PCDN client.

use thiserror::Error;


/// Client error types.
///
/// Vendor-level failures reported through `retcode`/`retmsg` are not errors;
/// they arrive as ordinary responses.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request body could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body is not valid JSON or does not match the expected shape.
    #[error("failed to decode response (HTTP {status}): {source}")]
    Decode {
        /// HTTP status code of the response.
        status: u16,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// More URLs were supplied than a single call accepts.
    #[error("the length of urls is beyond {max}: got {count}")]
    TooManyUrls {
        /// Number of URLs supplied.
        count: usize,
        /// Maximum number of URLs accepted.
        max: usize,
    },

    /// Timestamp cannot be represented as a calendar time.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Client configuration is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
