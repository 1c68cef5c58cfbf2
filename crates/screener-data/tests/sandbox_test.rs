//! Integration tests for the sandbox data source.

use chrono::NaiveDate;
use screener_data::sandbox::{SANDBOX_CONSTITUENTS, SANDBOX_NON_CONSTITUENTS};
use screener_data::{MarketDataSource, SandboxMarketData, UniverseSource};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_snapshot_lists_index_members_first() {
    let sandbox = SandboxMarketData::new(date(2025, 9, 30));
    let snapshot = sandbox.prices_on_date(date(2025, 9, 30)).await.unwrap();

    assert_eq!(
        snapshot.len(),
        SANDBOX_CONSTITUENTS.len() + SANDBOX_NON_CONSTITUENTS.len()
    );
    let first: Vec<&str> = snapshot.iter().take(3).map(|(s, _)| s).collect();
    assert_eq!(first, &SANDBOX_CONSTITUENTS[..3]);
    for (_, bar) in snapshot.iter() {
        assert!(bar.is_consistent());
    }
}

#[tokio::test]
async fn test_old_snapshot_omits_unlisted_symbols() {
    let sandbox = SandboxMarketData::new(date(2025, 9, 30));
    let snapshot = sandbox.prices_on_date(date(1995, 1, 3)).await.unwrap();

    let expected = SandboxMarketData::all_symbols()
        .filter(|s| SandboxMarketData::listing_date(s) <= date(1995, 1, 3))
        .count();
    assert_eq!(snapshot.len(), expected);
    assert!(snapshot.len() < SANDBOX_CONSTITUENTS.len());
}

#[tokio::test]
async fn test_previous_close_matches_snapshot() {
    let as_of = date(2025, 9, 30);
    let sandbox = SandboxMarketData::new(as_of);
    let snapshot = sandbox.prices_on_date(as_of).await.unwrap();

    let bar = sandbox.previous_close("MSFT").await.unwrap();
    assert_eq!(Some(&bar), snapshot.get("MSFT"));
}

#[tokio::test]
async fn test_unknown_symbol_is_unavailable() {
    let sandbox = SandboxMarketData::new(date(2025, 9, 30));
    assert!(sandbox.previous_close("ZZZZ").await.is_err());
    assert!(sandbox.market_cap("ZZZZ").await.is_err());
}

#[tokio::test]
async fn test_market_cap_is_stable_per_symbol() {
    let a = SandboxMarketData::new(date(2025, 1, 2));
    let b = SandboxMarketData::new(date(2026, 3, 4));
    let cap = a.market_cap("NVDA").await.unwrap();
    assert_eq!(cap, b.market_cap("NVDA").await.unwrap());
    assert!(cap >= 5.0e9);
}

#[tokio::test]
async fn test_constituents_exclude_non_index_symbols() {
    let sandbox = SandboxMarketData::new(date(2025, 9, 30));
    let symbols = sandbox.index_constituents().await.unwrap();
    assert_eq!(symbols.len(), SANDBOX_CONSTITUENTS.len());
    for extra in SANDBOX_NON_CONSTITUENTS {
        assert!(!symbols.iter().any(|s| s == extra));
    }
}
