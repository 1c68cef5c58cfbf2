//! Named records handed across the data-source boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Round half away from zero to two decimal places.
///
/// Values whose binary representation falls just short of the half-cent
/// (e.g. `1.005`) round down.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Low, high and close prices for one symbol on one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Session low.
    pub low: f64,
    /// Session high.
    pub high: f64,
    /// Session close.
    pub close: f64,
}

impl PriceBar {
    /// Create a new bar.
    pub const fn new(low: f64, high: f64, close: f64) -> Self {
        Self { low, high, close }
    }

    /// Whether `low <= close <= high` holds.
    pub fn is_consistent(&self) -> bool {
        self.low <= self.close && self.close <= self.high
    }
}

/// A security with its latest price and, when fetched, its market capitalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    /// Ticker symbol.
    pub symbol: String,
    /// Close price used for sizing.
    pub price: f64,
    /// Market capitalization in dollars.
    pub market_cap: Option<f64>,
}

impl TickerRecord {
    /// Create a record without market capitalization.
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            market_cap: None,
        }
    }

    /// Attach a market capitalization.
    pub const fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }
}

/// Prices for every symbol traded on one calendar date.
///
/// Iteration follows the order in which symbols were first inserted, which
/// is the order the provider listed them. Re-inserting a symbol replaces
/// its bar but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    date: Option<NaiveDate>,
    bars: Vec<(String, PriceBar)>,
    index: HashMap<String, usize>,
}

impl PriceSnapshot {
    /// Create an empty snapshot for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Date the snapshot describes, if known.
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Insert or replace the bar for `symbol`.
    pub fn insert(&mut self, symbol: impl Into<String>, bar: PriceBar) {
        let symbol = symbol.into();
        if let Some(&pos) = self.index.get(&symbol) {
            self.bars[pos].1 = bar;
        } else {
            self.index.insert(symbol.clone(), self.bars.len());
            self.bars.push((symbol, bar));
        }
    }

    /// Look up the bar for `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&PriceBar> {
        self.index.get(symbol).map(|&pos| &self.bars[pos].1)
    }

    /// Whether `symbol` traded on this date.
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Iterate over `(symbol, bar)` pairs in provider order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceBar)> {
        self.bars.iter().map(|(s, b)| (s.as_str(), b))
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the snapshot holds no prices.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, PriceBar)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, PriceBar)>>(iter: I) -> Self {
        let mut snapshot = Self::default();
        for (symbol, bar) in iter {
            snapshot.insert(symbol, bar);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_keeps_first_seen_order_on_replace() {
        let mut snapshot = PriceSnapshot::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        snapshot.insert("AAPL", PriceBar::new(1.0, 3.0, 2.0));
        snapshot.insert("MSFT", PriceBar::new(4.0, 6.0, 5.0));
        snapshot.insert("AAPL", PriceBar::new(7.0, 9.0, 8.0));

        let order: Vec<&str> = snapshot.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!["AAPL", "MSFT"]);
        assert_eq!(snapshot.get("AAPL").unwrap().close, 8.0);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_bar_consistency() {
        assert!(PriceBar::new(1.0, 3.0, 2.0).is_consistent());
        assert!(PriceBar::new(2.0, 2.0, 2.0).is_consistent());
        assert!(!PriceBar::new(2.5, 3.0, 2.0).is_consistent());
    }

    #[test]
    fn test_ticker_record_market_cap() {
        let record = TickerRecord::new("AAPL", 190.5).with_market_cap(2.9e12);
        assert_eq!(record.market_cap, Some(2.9e12));
        assert!(TickerRecord::new("MSFT", 400.0).market_cap.is_none());
    }
}
