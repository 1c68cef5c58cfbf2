//! Collaborator traits consumed by the screener core.

use crate::error::Result;
use crate::types::{PriceBar, PriceSnapshot};
use chrono::NaiveDate;
use std::future::Future;

/// Point-in-time prices and market capitalization for US equities.
///
/// Implementations must surface every failed or malformed response as an
/// error. They never fall back to default values.
pub trait MarketDataSource {
    /// Low/high/close for every symbol that traded on `date`.
    ///
    /// A non-trading day yields an empty snapshot, not an error.
    fn prices_on_date(&self, date: NaiveDate) -> impl Future<Output = Result<PriceSnapshot>> + Send;

    /// Previous session's bar for a single symbol.
    fn previous_close(&self, symbol: &str) -> impl Future<Output = Result<PriceBar>> + Send;

    /// Market capitalization of `symbol` in dollars.
    fn market_cap(&self, symbol: &str) -> impl Future<Output = Result<f64>> + Send;
}

/// Supplier of the index constituent list.
pub trait UniverseSource {
    /// Ticker symbols of the index constituents, in provider order.
    fn index_constituents(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}
