//! Price-return ranking between two snapshots.

use crate::allocation::{Priced, round_to_cents};
use crate::error::{Result, ScreenError};
use crate::universe::Universe;
use screener_data::PriceSnapshot;

/// A symbol with its current price and return over the change window.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// Ticker symbol.
    pub symbol: String,
    /// Current close.
    pub price: f64,
    /// Percentage return, rounded to two decimals.
    pub percent_change: f64,
}

impl Priced for RankedEntry {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn price(&self) -> f64 {
        self.price
    }
}

/// Output of [`rank_returns`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Top entries by descending percent change.
    pub entries: Vec<RankedEntry>,
    /// Symbols with a current price but no usable past price, in snapshot order.
    pub unavailable: Vec<String>,
}

/// Percentage change from `past` to `current`, rounded half away from zero
/// to two decimals.
pub fn percent_change(current: f64, past: f64) -> f64 {
    round_to_cents((current - past) / past * 100.0)
}

/// Rank symbols in `current` by return since `past` and keep the top `limit`.
///
/// Symbols outside `filter` (when given) are skipped. A symbol missing from
/// `past`, or whose past close is not a positive number, goes to
/// [`Ranking::unavailable`] instead of the ranking. Entries are sorted by
/// descending percent change; equal returns keep their order in `current`.
///
/// # Errors
///
/// Returns [`ScreenError::NoData`] if `current` is empty.
pub fn rank_returns<U>(
    current: &PriceSnapshot,
    past: &PriceSnapshot,
    filter: Option<&U>,
    limit: usize,
) -> Result<Ranking>
where
    U: Universe + ?Sized,
{
    if current.is_empty() {
        return Err(ScreenError::NoData(match current.date() {
            Some(date) => format!("no prices for {date}"),
            None => "current price snapshot is empty".to_string(),
        }));
    }

    let mut ranking = Ranking::default();
    for (symbol, bar) in current.iter() {
        if filter.is_some_and(|universe| !universe.contains(symbol)) {
            continue;
        }
        let Some(past_bar) = past.get(symbol) else {
            ranking.unavailable.push(symbol.to_string());
            continue;
        };
        if !past_bar.close.is_finite() || past_bar.close <= 0.0 {
            tracing::warn!(symbol, close = past_bar.close, "unusable past close");
            ranking.unavailable.push(symbol.to_string());
            continue;
        }
        ranking.entries.push(RankedEntry {
            symbol: symbol.to_string(),
            price: bar.close,
            percent_change: percent_change(bar.close, past_bar.close),
        });
    }

    ranking
        .entries
        .sort_by(|a, b| b.percent_change.total_cmp(&a.percent_change));
    ranking.entries.truncate(limit);

    tracing::info!(
        ranked = ranking.entries.len(),
        unavailable = ranking.unavailable.len(),
        "ranked price returns"
    );
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::IndexUniverse;
    use chrono::NaiveDate;
    use rstest::rstest;
    use screener_data::PriceBar;

    fn snapshot(closes: &[(&str, f64)]) -> PriceSnapshot {
        closes
            .iter()
            .map(|&(s, c)| (s, PriceBar::new(c, c, c)))
            .collect()
    }

    #[rstest]
    #[case(110.0, 100.0, 10.0)]
    #[case(95.0, 100.0, -5.0)]
    #[case(100.0, 100.0, 0.0)]
    #[case(200.0, 3.0, 6566.67)]
    #[case(1.0, 3.0, -66.67)]
    fn test_percent_change(#[case] current: f64, #[case] past: f64, #[case] expected: f64) {
        assert_eq!(percent_change(current, past), expected);
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let current = snapshot(&[("A", 110.0), ("B", 95.0), ("C", 150.0), ("D", 101.0)]);
        let past = snapshot(&[("A", 100.0), ("B", 100.0), ("C", 100.0), ("D", 100.0)]);

        let ranking = rank_returns::<IndexUniverse>(&current, &past, None, 3).unwrap();
        let symbols: Vec<&str> = ranking.entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "A", "D"]);
        assert_eq!(ranking.entries[0].percent_change, 50.0);
        assert_eq!(ranking.entries[0].price, 150.0);
        assert!(ranking.unavailable.is_empty());
    }

    #[test]
    fn test_missing_past_goes_to_unavailable() {
        let current = snapshot(&[("A", 110.0), ("NEW", 20.0), ("B", 95.0)]);
        let past = snapshot(&[("A", 100.0), ("B", 100.0), ("GONE", 5.0)]);

        let ranking = rank_returns::<IndexUniverse>(&current, &past, None, 10).unwrap();
        assert_eq!(ranking.unavailable, vec!["NEW"]);
        assert!(ranking.entries.iter().all(|e| e.symbol != "NEW"));
        assert_eq!(ranking.entries.len(), 2);
    }

    #[test]
    fn test_zero_past_close_is_unavailable() {
        let current = snapshot(&[("A", 110.0), ("Z", 4.0)]);
        let past = snapshot(&[("A", 100.0), ("Z", 0.0)]);

        let ranking = rank_returns::<IndexUniverse>(&current, &past, None, 10).unwrap();
        assert_eq!(ranking.unavailable, vec!["Z"]);
        assert_eq!(ranking.entries.len(), 1);
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        let current = snapshot(&[("X", 110.0), ("Y", 220.0), ("Z", 55.0), ("W", 1.0)]);
        let past = snapshot(&[("X", 100.0), ("Y", 200.0), ("Z", 50.0), ("W", 2.0)]);

        let ranking = rank_returns::<IndexUniverse>(&current, &past, None, 10).unwrap();
        let symbols: Vec<&str> = ranking.entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["X", "Y", "Z", "W"]);
    }

    #[test]
    fn test_universe_filter() {
        let current = snapshot(&[("A", 110.0), ("OUT", 500.0), ("NEWOUT", 9.0), ("B", 95.0)]);
        let past = snapshot(&[("A", 100.0), ("OUT", 100.0), ("B", 100.0)]);
        let universe = IndexUniverse::from_symbols(["A", "B"]);

        let ranking = rank_returns(&current, &past, Some(&universe), 10).unwrap();
        let symbols: Vec<&str> = ranking.entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B"]);
        assert!(ranking.unavailable.is_empty());
    }

    #[test]
    fn test_empty_current_is_no_data() {
        let current = PriceSnapshot::new(NaiveDate::from_ymd_opt(2024, 7, 6).unwrap());
        let past = snapshot(&[("A", 100.0)]);
        let err = rank_returns::<IndexUniverse>(&current, &past, None, 10).unwrap_err();
        assert!(matches!(err, ScreenError::NoData(msg) if msg.contains("2024-07-06")));
    }

    #[test]
    fn test_empty_past_marks_everything_unavailable() {
        let current = snapshot(&[("A", 110.0), ("B", 95.0)]);
        let ranking =
            rank_returns::<IndexUniverse>(&current, &PriceSnapshot::default(), None, 10).unwrap();
        assert!(ranking.entries.is_empty());
        assert_eq!(ranking.unavailable, vec!["A", "B"]);
    }

    #[test]
    fn test_zero_limit() {
        let current = snapshot(&[("A", 110.0)]);
        let past = snapshot(&[("A", 100.0)]);
        let ranking = rank_returns::<IndexUniverse>(&current, &past, None, 0).unwrap();
        assert!(ranking.entries.is_empty());
    }
}
