//! Polygon REST client.

use super::wire::{
    AggregatesResponse, TickerDetailsResponse, market_cap_from_wire, previous_bar_from_wire,
    snapshot_from_wire,
};
use crate::config::ProviderConfig;
use crate::error::{DataError, Result};
use crate::source::MarketDataSource;
use crate::types::{PriceBar, PriceSnapshot};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("screener/", env!("CARGO_PKG_VERSION"));

/// Market data backed by the Polygon aggregates and reference APIs.
///
/// Each call is a single request: no retries, no caching. Any transport
/// failure, non-2xx status or unparsable body is returned as an error.
pub struct PolygonClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    adjusted: bool,
}

impl std::fmt::Debug for PolygonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonClient")
            .field("base_url", &self.base_url)
            .field("adjusted", &self.adjusted)
            .finish_non_exhaustive()
    }
}

impl PolygonClient {
    /// Build a client from provider settings.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Network`] if the HTTP client cannot be constructed.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            adjusted: config.adjusted,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, adjusted: bool) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut query = vec![("apiKey", self.api_key.clone())];
        if adjusted {
            query.push(("adjusted", self.adjusted.to_string()));
        }

        tracing::debug!(endpoint, "polygon request");
        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "polygon request failed");
            return Err(DataError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl MarketDataSource for PolygonClient {
    async fn prices_on_date(&self, date: NaiveDate) -> Result<PriceSnapshot> {
        let endpoint = format!(
            "/v2/aggs/grouped/locale/us/market/stocks/{}",
            date.format("%Y-%m-%d")
        );
        let response: AggregatesResponse = self.get_json(&endpoint, true).await?;
        let snapshot = snapshot_from_wire(&endpoint, date, response)?;
        tracing::info!(%date, symbols = snapshot.len(), "fetched grouped daily prices");
        Ok(snapshot)
    }

    async fn previous_close(&self, symbol: &str) -> Result<PriceBar> {
        let endpoint = format!("/v2/aggs/ticker/{symbol}/prev");
        let response: AggregatesResponse = self.get_json(&endpoint, true).await?;
        previous_bar_from_wire(&endpoint, symbol, response)
    }

    async fn market_cap(&self, symbol: &str) -> Result<f64> {
        let endpoint = format!("/v3/reference/tickers/{symbol}");
        let response: TickerDetailsResponse = self.get_json(&endpoint, false).await?;
        market_cap_from_wire(symbol, response)
    }
}
