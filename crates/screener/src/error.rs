//! Error types for screening operations.

use screener_data::DataError;
use thiserror::Error;

/// Result type for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Errors that abort a screening run.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// A collaborator fetch failed or returned a malformed payload.
    #[error("Data unavailable: {0}")]
    Unavailable(#[from] DataError),

    /// Unrecognised change-window label.
    #[error("Invalid change window: {0}")]
    InvalidWindow(String),

    /// Empty universe or price snapshot.
    #[error("No data: {0}")]
    NoData(String),

    /// Non-positive or non-finite price reached allocation.
    #[error("Invalid price {price} for {symbol}")]
    InvalidPrice {
        /// Offending symbol
        symbol: String,
        /// Offending price
        price: f64,
    },

    /// Cent-rounded position costs add up to more than the portfolio amount.
    #[error("Capital invested {invested} exceeds portfolio amount {total} after rounding costs to cents")]
    CapitalExceeded {
        /// Capital invested
        invested: f64,
        /// Portfolio amount
        total: f64,
    },

    /// Invocation parameters out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
