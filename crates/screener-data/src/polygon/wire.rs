//! Polygon JSON payloads and their translation into named records.
//!
//! Polygon abbreviates aggregate fields (`T`, `l`, `h`, `c`). Those codes are
//! confined to this module; everything downstream sees [`PriceBar`] and
//! [`PriceSnapshot`].

use crate::error::{DataError, Result};
use crate::types::{PriceBar, PriceSnapshot};
use chrono::NaiveDate;
use serde::Deserialize;

/// Envelope of the aggregates endpoints (grouped daily and previous close).
#[derive(Debug, Deserialize)]
pub(crate) struct AggregatesResponse {
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) results: Option<Vec<AggregateBar>>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

/// One OHLC aggregate.
#[derive(Debug, Deserialize)]
pub(crate) struct AggregateBar {
    #[serde(rename = "T", default)]
    pub(crate) ticker: Option<String>,
    #[serde(rename = "l")]
    pub(crate) low: f64,
    #[serde(rename = "h")]
    pub(crate) high: f64,
    #[serde(rename = "c")]
    pub(crate) close: f64,
}

/// Envelope of the ticker reference endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TickerDetailsResponse {
    #[serde(default)]
    pub(crate) results: Option<TickerDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TickerDetails {
    #[serde(default)]
    pub(crate) market_cap: Option<f64>,
}

impl AggregateBar {
    const fn to_bar(&self) -> PriceBar {
        PriceBar::new(self.low, self.high, self.close)
    }
}

fn check_status(endpoint: &str, status: Option<&str>, error: Option<&str>) -> Result<()> {
    match status {
        Some("ERROR" | "NOT_AUTHORIZED") => Err(DataError::malformed(
            endpoint,
            error.unwrap_or("provider reported an error status"),
        )),
        _ => Ok(()),
    }
}

/// Translate a grouped-daily response into a snapshot.
///
/// A missing `results` array means the market was closed and produces an
/// empty snapshot. A bar without a ticker is a malformed payload.
pub(crate) fn snapshot_from_wire(
    endpoint: &str,
    date: NaiveDate,
    response: AggregatesResponse,
) -> Result<PriceSnapshot> {
    check_status(endpoint, response.status.as_deref(), response.error.as_deref())?;

    let mut snapshot = PriceSnapshot::new(date);
    for bar in response.results.unwrap_or_default() {
        let ticker = bar
            .ticker
            .as_deref()
            .ok_or_else(|| DataError::malformed(endpoint, "aggregate without ticker field `T`"))?;
        snapshot.insert(ticker, bar.to_bar());
    }
    Ok(snapshot)
}

/// Translate a previous-close response into the single bar it carries.
pub(crate) fn previous_bar_from_wire(
    endpoint: &str,
    symbol: &str,
    response: AggregatesResponse,
) -> Result<PriceBar> {
    check_status(endpoint, response.status.as_deref(), response.error.as_deref())?;

    response
        .results
        .and_then(|bars| bars.into_iter().next())
        .map(|bar| bar.to_bar())
        .ok_or_else(|| DataError::missing(symbol, "no previous-session aggregate"))
}

/// Extract `results.market_cap` from a ticker details response.
pub(crate) fn market_cap_from_wire(symbol: &str, response: TickerDetailsResponse) -> Result<f64> {
    response
        .results
        .and_then(|details| details.market_cap)
        .ok_or_else(|| DataError::missing(symbol, "market_cap absent from ticker details"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
    }

    #[test]
    fn test_grouped_daily_translation() {
        let response: AggregatesResponse = serde_json::from_value(json!({
            "adjusted": true,
            "queryCount": 2,
            "resultsCount": 2,
            "status": "OK",
            "results": [
                {"T": "AAPL", "v": 1.0e7, "vw": 187.1, "o": 186.0, "c": 187.43, "h": 188.3, "l": 185.36, "t": 1715716800000_i64, "n": 1},
                {"T": "MSFT", "v": 2.0e7, "o": 414.0, "c": 416.56, "h": 417.49, "l": 411.06, "t": 1715716800000_i64}
            ]
        }))
        .unwrap();

        let snapshot = snapshot_from_wire("grouped", date(), response).unwrap();
        assert_eq!(snapshot.date(), Some(date()));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("AAPL"), Some(&PriceBar::new(185.36, 188.3, 187.43)));
        let order: Vec<&str> = snapshot.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_closed_market_yields_empty_snapshot() {
        let response: AggregatesResponse = serde_json::from_value(json!({
            "status": "OK", "resultsCount": 0, "queryCount": 0
        }))
        .unwrap();
        let snapshot = snapshot_from_wire("grouped", date(), response).unwrap();
        assert!(snapshot.is_empty());
    }

    #[rstest]
    #[case("ERROR", Some("Unknown API Key"), "Unknown API Key")]
    #[case("NOT_AUTHORIZED", Some("Your plan doesn't include this data timeframe"), "plan")]
    #[case("ERROR", None, "provider reported an error status")]
    fn test_error_status_is_unavailable(
        #[case] status: &str,
        #[case] error: Option<&str>,
        #[case] expected: &str,
    ) {
        let response: AggregatesResponse = serde_json::from_value(json!({
            "status": status, "error": error
        }))
        .unwrap();
        let err = snapshot_from_wire("grouped", date(), response).unwrap_err();
        assert!(matches!(err, DataError::MalformedPayload { .. }));
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[rstest]
    #[case("OK")]
    #[case("DELAYED")]
    fn test_non_error_status_is_accepted(#[case] status: &str) {
        let response: AggregatesResponse = serde_json::from_value(json!({
            "status": status,
            "results": [{"T": "AAPL", "c": 187.43, "h": 188.3, "l": 185.36}]
        }))
        .unwrap();
        let snapshot = snapshot_from_wire("grouped", date(), response).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_bar_without_ticker_is_malformed() {
        let response: AggregatesResponse = serde_json::from_value(json!({
            "status": "OK",
            "results": [{"c": 1.0, "h": 1.0, "l": 1.0}]
        }))
        .unwrap();
        assert!(matches!(
            snapshot_from_wire("grouped", date(), response),
            Err(DataError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_missing_close_fails_to_parse() {
        let parsed = serde_json::from_value::<AggregatesResponse>(json!({
            "status": "OK",
            "results": [{"T": "AAPL", "h": 1.0, "l": 1.0}]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_previous_bar() {
        let response: AggregatesResponse = serde_json::from_value(json!({
            "ticker": "AAPL",
            "status": "OK",
            "results": [{"T": "AAPL", "c": 187.43, "h": 188.3, "l": 185.36}]
        }))
        .unwrap();
        let bar = previous_bar_from_wire("prev", "AAPL", response).unwrap();
        assert_eq!(bar.close, 187.43);

        let empty: AggregatesResponse =
            serde_json::from_value(json!({"status": "OK", "results": []})).unwrap();
        assert!(matches!(
            previous_bar_from_wire("prev", "AAPL", empty),
            Err(DataError::MissingData { .. })
        ));
    }

    #[test]
    fn test_market_cap_nested_field() {
        let response: TickerDetailsResponse = serde_json::from_value(json!({
            "status": "OK",
            "results": {"ticker": "AAPL", "name": "Apple Inc.", "market_cap": 2.88e12}
        }))
        .unwrap();
        assert_eq!(market_cap_from_wire("AAPL", response).unwrap(), 2.88e12);

        let response: TickerDetailsResponse = serde_json::from_value(json!({
            "status": "OK",
            "results": {"ticker": "XYZ"}
        }))
        .unwrap();
        assert!(market_cap_from_wire("XYZ", response).is_err());
    }
}
