//! S&P 500 constituents scraped from the Wikipedia table JSON rendering.

use crate::config::ProviderConfig;
use crate::error::{DataError, Result};
use crate::source::UniverseSource;

/// Column holding the ticker symbol.
const SYMBOL_COLUMN: &str = "Symbol";

/// Client for a `wikitable2json`-style endpoint.
///
/// The endpoint returns an array of tables; each table is an array of rows
/// and the first row holds the column headers.
#[derive(Debug)]
pub struct WikiTableClient {
    client: reqwest::Client,
    url: String,
}

impl WikiTableClient {
    /// Build a client for the configured constituents URL.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Network`] if the HTTP client cannot be constructed.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;
        Ok(Self {
            client,
            url: config.constituents_url.clone(),
        })
    }
}

impl UniverseSource for WikiTableClient {
    async fn index_constituents(&self) -> Result<Vec<String>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                endpoint: self.url.clone(),
            });
        }
        let tables: Vec<Vec<Vec<String>>> = serde_json::from_str(&response.text().await?)?;
        let symbols = symbols_from_tables(&self.url, tables)?;
        tracing::info!(count = symbols.len(), "fetched index constituents");
        Ok(symbols)
    }
}

/// Pull the `Symbol` column out of the first table.
pub(crate) fn symbols_from_tables(
    endpoint: &str,
    tables: Vec<Vec<Vec<String>>>,
) -> Result<Vec<String>> {
    let mut rows = tables
        .into_iter()
        .next()
        .ok_or_else(|| DataError::malformed(endpoint, "no tables in response"))?
        .into_iter();
    let headers = rows
        .next()
        .ok_or_else(|| DataError::malformed(endpoint, "table has no header row"))?;
    let column = headers
        .iter()
        .position(|h| h.trim() == SYMBOL_COLUMN)
        .ok_or_else(|| DataError::malformed(endpoint, "table has no Symbol column"))?;

    rows.map(|row| {
        row.get(column)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DataError::malformed(endpoint, "row without a symbol"))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Vec<Vec<String>>> {
        vec![
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        ]
    }

    #[test]
    fn test_extracts_symbol_column() {
        let tables = table(&[
            &["Symbol", "Security", "GICS Sector"],
            &["MMM", "3M", "Industrials"],
            &[" AOS ", "A. O. Smith", "Industrials"],
        ]);
        let symbols = symbols_from_tables("wiki", tables).unwrap();
        assert_eq!(symbols, vec!["MMM", "AOS"]);
    }

    #[test]
    fn test_symbol_column_need_not_be_first() {
        let tables = table(&[&["Security", "Symbol"], &["Apple Inc.", "AAPL"]]);
        assert_eq!(symbols_from_tables("wiki", tables).unwrap(), vec!["AAPL"]);
    }

    #[test]
    fn test_missing_symbol_column() {
        let tables = table(&[&["Security"], &["Apple Inc."]]);
        assert!(matches!(
            symbols_from_tables("wiki", tables),
            Err(DataError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let tables = table(&[&["Security", "Symbol"], &["Apple Inc."]]);
        assert!(symbols_from_tables("wiki", tables).is_err());
    }

    #[test]
    fn test_no_tables() {
        assert!(symbols_from_tables("wiki", Vec::new()).is_err());
    }
}
