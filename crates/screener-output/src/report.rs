//! Portfolio reports.
//!
//! A [`PortfolioReport`] is assembled once per run through
//! [`PortfolioReportBuilder`] and is not modified afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required builder field was never set.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),

    /// Invested capital exceeds the portfolio amount.
    #[error("Capital invested {invested} exceeds total capital {total}")]
    CapitalExceeded {
        /// Capital invested.
        invested: f64,
        /// Total capital.
        total: f64,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Which screen produced a report. Determines columns and file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenKind {
    /// Equal-weight index portfolio; the metric column is market cap.
    EqualWeight,
    /// Momentum portfolio; the metric column is the window's percent change.
    Momentum {
        /// Change-window label, e.g. `1year`.
        window: String,
    },
}

impl ScreenKind {
    /// Momentum report for `window`.
    pub fn momentum(window: impl Into<String>) -> Self {
        Self::Momentum {
            window: window.into(),
        }
    }

    /// Header of the third column.
    pub fn metric_column(&self) -> String {
        match self {
            Self::EqualWeight => "Market Capitalization".to_string(),
            Self::Momentum { window } => format!("Percent Change over: {window}"),
        }
    }

    /// The four column headers, in order.
    pub fn columns(&self) -> [String; 4] {
        [
            "Ticker".to_string(),
            "Stock Price".to_string(),
            self.metric_column(),
            "Number of Shares to Purchase".to_string(),
        ]
    }

    /// File name without extension.
    pub fn file_stem(&self) -> String {
        match self {
            Self::EqualWeight => "S&P 500 Recommendations".to_string(),
            Self::Momentum { window } => format!("Quantitative Momentum over - {window}"),
        }
    }

    /// Label prefix for the unavailable-symbol summary rows.
    pub const fn unavailable_label(&self) -> &'static str {
        match self {
            Self::EqualWeight => "Stocks without a current price",
            Self::Momentum { .. } => "Stocks not available in the past to evaluate",
        }
    }
}

/// One position in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Ticker symbol.
    pub symbol: String,
    /// Price per share.
    pub price: f64,
    /// Market cap (equal weight) or percent change (momentum).
    pub metric: f64,
    /// Whole shares to buy.
    pub shares: u64,
}

impl ReportEntry {
    /// Create a new entry.
    pub fn new(symbol: impl Into<String>, price: f64, metric: f64, shares: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            metric,
            shares,
        }
    }
}

/// Trailing summary of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Portfolio amount.
    pub total_capital: f64,
    /// Capital spent on the listed shares.
    pub capital_invested: f64,
    /// Capital left over, as computed by the allocator.
    pub capital_remaining: f64,
    /// Symbols that could not be evaluated.
    pub unavailable: Vec<String>,
}

impl ReportSummary {
    /// Number of symbols that could not be evaluated.
    pub fn unavailable_count(&self) -> usize {
        self.unavailable.len()
    }
}

/// A finished portfolio report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Screen that produced the report.
    pub kind: ScreenKind,
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Price date the report is based on.
    pub as_of: Option<NaiveDate>,
    /// Positions, in ranking order.
    pub entries: Vec<ReportEntry>,
    /// Capital and availability summary.
    pub summary: ReportSummary,
}

impl PortfolioReport {
    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug)]
pub struct PortfolioReportBuilder {
    kind: ScreenKind,
    as_of: Option<NaiveDate>,
    entries: Vec<ReportEntry>,
    total_capital: Option<f64>,
    capital_invested: Option<f64>,
    capital_remaining: Option<f64>,
    unavailable: Vec<String>,
}

impl PortfolioReportBuilder {
    /// Create a new report builder.
    pub const fn new(kind: ScreenKind) -> Self {
        Self {
            kind,
            as_of: None,
            entries: Vec::new(),
            total_capital: None,
            capital_invested: None,
            capital_remaining: None,
            unavailable: Vec::new(),
        }
    }

    /// Set the price date.
    pub const fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Append one entry.
    pub fn entry(mut self, entry: ReportEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append entries.
    pub fn entries(mut self, entries: impl IntoIterator<Item = ReportEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Set the portfolio amount.
    pub const fn total_capital(mut self, amount: f64) -> Self {
        self.total_capital = Some(amount);
        self
    }

    /// Set the capital spent.
    pub const fn capital_invested(mut self, amount: f64) -> Self {
        self.capital_invested = Some(amount);
        self
    }

    /// Set the capital left over.
    pub const fn capital_remaining(mut self, amount: f64) -> Self {
        self.capital_remaining = Some(amount);
        self
    }

    /// Append symbols that could not be evaluated.
    pub fn unavailable(mut self, symbols: impl IntoIterator<Item = String>) -> Self {
        self.unavailable.extend(symbols);
        self
    }

    /// Build the report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingField`] if a capital figure is unset and
    /// [`ReportError::CapitalExceeded`] if more was invested than was
    /// available or the remainder is negative.
    pub fn build(self) -> Result<PortfolioReport, ReportError> {
        let total = self
            .total_capital
            .ok_or(ReportError::MissingField("total_capital"))?;
        let invested = self
            .capital_invested
            .ok_or(ReportError::MissingField("capital_invested"))?;
        let remaining = self
            .capital_remaining
            .ok_or(ReportError::MissingField("capital_remaining"))?;
        if invested > total || remaining < 0.0 {
            return Err(ReportError::CapitalExceeded { invested, total });
        }

        Ok(PortfolioReport {
            kind: self.kind,
            generated_at: Utc::now(),
            as_of: self.as_of,
            entries: self.entries,
            summary: ReportSummary {
                total_capital: total,
                capital_invested: invested,
                capital_remaining: remaining,
                unavailable: self.unavailable,
            },
        })
    }
}
