//! Provider settings read from the environment.

use crate::error::{DataError, Result};
use std::time::Duration;

/// Default Polygon REST endpoint.
pub const DEFAULT_POLYGON_BASE_URL: &str = "https://api.polygon.io";

/// Default S&P 500 constituents table, rendered as JSON.
pub const DEFAULT_CONSTITUENTS_URL: &str =
    "https://www.wikitable2json.com/api/List_of_S%26P_500_companies?table=0";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the live market-data and constituents providers.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Polygon API key.
    pub api_key: String,
    /// Polygon base URL.
    pub base_url: String,
    /// Request split/dividend adjusted aggregates.
    pub adjusted: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// URL of the constituents table.
    pub constituents_url: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("adjusted", &self.adjusted)
            .field("timeout", &self.timeout)
            .field("constituents_url", &self.constituents_url)
            .finish_non_exhaustive()
    }
}

impl ProviderConfig {
    /// Create a config with default endpoints for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_POLYGON_BASE_URL.to_string(),
            adjusted: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            constituents_url: DEFAULT_CONSTITUENTS_URL.to_string(),
        }
    }

    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingConfig`] when `POLYGON_API_KEY` is unset or
    /// a numeric/boolean variable does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// Recognised keys: `POLYGON_API_KEY`, `POLYGON_BASE_URL`,
    /// `POLYGON_ADJUSTED`, `POLYGON_TIMEOUT_SECS`, `SP500_CONSTITUENTS_URL`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("POLYGON_API_KEY")
            .ok_or_else(|| DataError::MissingConfig("POLYGON_API_KEY is required".to_string()))?;
        let mut config = Self::new(api_key);

        if let Some(base_url) = non_empty("POLYGON_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(adjusted) = non_empty("POLYGON_ADJUSTED") {
            config.adjusted = adjusted.trim().parse().map_err(|_| {
                DataError::MissingConfig(format!("POLYGON_ADJUSTED must be true or false, got {adjusted}"))
            })?;
        }
        if let Some(secs) = non_empty("POLYGON_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                DataError::MissingConfig(format!("POLYGON_TIMEOUT_SECS must be an integer, got {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(url) = non_empty("SP500_CONSTITUENTS_URL") {
            config.constituents_url = url;
        }

        Ok(config)
    }
}
