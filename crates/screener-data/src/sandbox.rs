//! Offline, deterministic market data for tests and dry runs.
//!
//! Prices are a pure function of `(symbol, date)`: a per-symbol base price
//! and annual drift derived from a hash of the symbol, plus a small
//! day-specific perturbation drawn from an RNG seeded with the symbol and the
//! date. Each symbol also gets a synthetic listing date; snapshots for dates
//! before it omit the symbol. Weekends and holidays are not modelled.

use crate::error::{DataError, Result};
use crate::source::{MarketDataSource, UniverseSource};
use crate::types::{PriceBar, PriceSnapshot, round_to_cents};
use chrono::{Datelike, Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Index members served by the sandbox.
pub const SANDBOX_CONSTITUENTS: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "AVGO", "ORCL", "CSCO", "ACN", "AMD", "IBM", "INTC", "TXN", "QCOM",
    "ADBE", "CRM", "NOW", "LLY", "UNH", "JNJ", "ABBV", "MRK", "TMO", "ABT", "DHR", "PFE", "BMY",
    "AMGN", "GILD", "BRK.B", "JPM", "V", "MA", "BAC", "WFC", "MS", "GS", "BLK", "C", "AXP",
    "SCHW", "AMZN", "TSLA", "HD", "MCD", "NKE", "SBUX", "LOW", "TJX", "BKNG", "CMG", "F", "GM",
    "GOOGL", "GOOG", "META", "NFLX", "DIS", "CMCSA", "T", "VZ", "TMUS", "EA", "CAT", "UNP", "RTX",
    "HON", "UPS", "BA", "DE", "LMT", "GE", "MMM", "FDX", "NSC", "WMT", "PG", "COST", "KO", "PEP",
    "PM", "MO", "CL", "MDLZ", "KHC", "XOM", "CVX", "COP", "SLB", "EOG", "MPC", "PSX", "VLO", "OXY",
    "HAL", "NEE", "SO", "DUK", "CEG", "AEP", "EXC", "XEL", "D", "PLD", "AMT", "EQIX", "CCI", "PSA",
    "SPG", "O", "WELL", "LIN", "APD", "SHW", "FCX", "NEM", "ECL", "DD", "DOW", "PPG", "NUE",
];

/// Traded symbols that are not index members.
pub const SANDBOX_NON_CONSTITUENTS: &[&str] = &["PLTR", "RIVN", "SOFI", "HOOD", "DKNG", "ROKU"];

/// Earliest synthetic listing date.
const LISTING_EPOCH: (i32, u32, u32) = (1990, 1, 1);

/// Listing dates are spread over this many days after the epoch (~35 years).
const LISTING_SPREAD_DAYS: u64 = 12_784;

/// Deterministic stand-in for the live providers.
#[derive(Debug, Clone)]
pub struct SandboxMarketData {
    as_of: NaiveDate,
}

impl SandboxMarketData {
    /// Sandbox whose "previous session" is `as_of`.
    pub const fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Sandbox whose previous session is yesterday on the local clock.
    pub fn latest() -> Self {
        let today = Local::now().date_naive();
        Self::new(today.checked_sub_days(Days::new(1)).unwrap_or(today))
    }

    /// Date used for [`MarketDataSource::previous_close`].
    pub const fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Every symbol the sandbox knows about, index members first.
    pub fn all_symbols() -> impl Iterator<Item = &'static str> {
        SANDBOX_CONSTITUENTS
            .iter()
            .chain(SANDBOX_NON_CONSTITUENTS)
            .copied()
    }

    /// Synthetic first trading day of `symbol`.
    pub fn listing_date(symbol: &str) -> NaiveDate {
        let (y, m, d) = LISTING_EPOCH;
        let epoch = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
        let offset = symbol_hash(symbol).rotate_left(17) % LISTING_SPREAD_DAYS;
        epoch.checked_add_days(Days::new(offset)).unwrap_or(epoch)
    }

    /// Bar for `symbol` on `date`, or `None` before its listing date.
    pub fn bar(symbol: &str, date: NaiveDate) -> Option<PriceBar> {
        let listed = Self::listing_date(symbol);
        if date < listed {
            return None;
        }

        let hash = symbol_hash(symbol);
        let base = 10.0 + (hash % 29_000) as f64 / 100.0;
        let drift = -0.10 + ((hash >> 16) % 4_001) as f64 / 10_000.0;
        let years = (date - listed).num_days() as f64 / 365.25;
        let trend = base * (1.0 + drift).powf(years);

        let day = u64::try_from(date.num_days_from_ce()).unwrap_or_default();
        let mut rng = StdRng::seed_from_u64(hash ^ day.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let noise = rng.gen_range(-0.02..0.02);
        let max_move = rng.gen_range(0.01..0.02);

        let close = round_to_cents((trend * (1.0 + noise)).max(0.01));
        let low = round_to_cents(close * (1.0 - rng.gen_range(0.0..max_move))).max(0.01);
        let high = round_to_cents(close * (1.0 + rng.gen_range(0.0..max_move)));

        Some(PriceBar::new(low.min(close), high.max(close), close))
    }

    fn is_known(symbol: &str) -> bool {
        Self::all_symbols().any(|s| s == symbol)
    }
}

impl Default for SandboxMarketData {
    fn default() -> Self {
        Self::latest()
    }
}

impl MarketDataSource for SandboxMarketData {
    async fn prices_on_date(&self, date: NaiveDate) -> Result<PriceSnapshot> {
        let mut snapshot = PriceSnapshot::new(date);
        for symbol in Self::all_symbols() {
            if let Some(bar) = Self::bar(symbol, date) {
                snapshot.insert(symbol, bar);
            }
        }
        tracing::debug!(%date, symbols = snapshot.len(), "sandbox snapshot");
        Ok(snapshot)
    }

    async fn previous_close(&self, symbol: &str) -> Result<PriceBar> {
        if !Self::is_known(symbol) {
            return Err(DataError::missing(symbol, "unknown sandbox symbol"));
        }
        Self::bar(symbol, self.as_of)
            .ok_or_else(|| DataError::missing(symbol, format!("not listed on {}", self.as_of)))
    }

    async fn market_cap(&self, symbol: &str) -> Result<f64> {
        if !Self::is_known(symbol) {
            return Err(DataError::missing(symbol, "unknown sandbox symbol"));
        }
        let hash = symbol_hash(symbol);
        Ok(5.0e9 + ((hash >> 8) % 2_995) as f64 * 1.0e9)
    }
}

impl UniverseSource for SandboxMarketData {
    async fn index_constituents(&self) -> Result<Vec<String>> {
        Ok(SANDBOX_CONSTITUENTS.iter().map(|s| s.to_string()).collect())
    }
}

/// FNV-1a, stable across builds and platforms.
fn symbol_hash(symbol: &str) -> u64 {
    symbol.bytes().fold(0xcbf2_9ce4_8422_2325, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}
