//! Export functionality for portfolio reports.
//!
//! CSV output mirrors a spreadsheet: a header row, one row per position, a
//! blank separator row, then labelled summary rows. Fields containing the
//! delimiter are quoted by the CSV writer; no other escaping is applied.

use crate::report::{PortfolioReport, ScreenKind};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced non UTF-8 output.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// The content is fully serialized before the file is created, so a
    /// serialization failure leaves no file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl PortfolioReport {
    /// Default output path for this report inside `dir`.
    pub fn output_path(&self, dir: &Path, format: ExportFormat) -> PathBuf {
        dir.join(format!("{}.{}", self.kind.file_stem(), format.extension()))
    }

    fn to_csv(&self) -> Result<String, ExportError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(self.kind.columns())?;

        for entry in &self.entries {
            let metric = match self.kind {
                ScreenKind::EqualWeight => entry.metric.to_string(),
                ScreenKind::Momentum { .. } => format!("{:.2}", entry.metric),
            };
            wtr.write_record([
                entry.symbol.clone(),
                entry.price.to_string(),
                metric,
                entry.shares.to_string(),
            ])?;
        }

        let summary = &self.summary;
        let label = self.kind.unavailable_label();
        let rows = [
            (String::new(), String::new()),
            (
                "Total Capital:".to_string(),
                format!("{:.2}", summary.total_capital),
            ),
            (
                "Capital invested:".to_string(),
                format!("{:.2}", summary.capital_invested),
            ),
            (
                "Capital remaining:".to_string(),
                format!("{:.2}", summary.capital_remaining),
            ),
            (
                format!("{label} (Count):"),
                summary.unavailable_count().to_string(),
            ),
            (format!("{label} (List):"), summary.unavailable.join(", ")),
        ];
        for (name, value) in rows {
            wtr.write_record([name, value, String::new(), String::new()])?;
        }

        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl Exporter for PortfolioReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
