//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching market or constituent data.
///
/// Every variant means the requested data is unavailable; callers must not
/// substitute defaults for a failed fetch.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("HTTP {status} from {endpoint}")]
    Http {
        /// Status code returned by the provider
        status: u16,
        /// Endpoint path, without credentials
        endpoint: String,
    },

    /// The response body was not valid JSON for the expected shape.
    #[error("Data parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response parsed but did not carry the fields we need.
    #[error("Malformed payload from {endpoint}: {reason}")]
    MalformedPayload {
        /// Endpoint path, without credentials
        endpoint: String,
        /// What was wrong with the payload
        reason: String,
    },

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Required configuration value is absent or unparsable.
    #[error("Configuration error: {0}")]
    MissingConfig(String),
}

impl DataError {
    pub(crate) fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingData {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}
