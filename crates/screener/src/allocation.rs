//! Turning a capital amount into whole-share positions.
//!
//! Every slot gets `total_capital / slots` dollars and buys as many whole
//! shares as that buys, rounding down. Flooring keeps the raw cost of each
//! position within its slot.
//!
//! Invested capital is the sum of per-position costs rounded to cents, and
//! that rounding can push the total past the portfolio amount. It happens
//! when the slot size is off the cent grid and a position's cost lands in
//! the half-cent below the slot, e.g. six slots of 10.00 each holding two
//! shares at 0.8333 (cost 1.6666, recorded as 1.67, 10.02 in total).
//! Sub-dollar quotes with four decimals make this reachable. Such an
//! allocation is rejected with [`ScreenError::CapitalExceeded`] instead of
//! reporting negative remaining capital. Floating-point error at an exact
//! boundary (a price dividing the slot size exactly) can also move a share
//! count by one either way and is caught by the same check.

use crate::error::{Result, ScreenError};

pub use screener_data::round_to_cents;

/// Anything with a symbol and a per-share price.
pub trait Priced {
    /// Ticker symbol.
    fn symbol(&self) -> &str;

    /// Price per share.
    fn price(&self) -> f64;
}

impl Priced for screener_data::TickerRecord {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn price(&self) -> f64 {
        self.price
    }
}

/// Share counts and capital usage for an ordered list of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Dollars available to each slot.
    pub position_size: f64,
    /// Whole shares to buy, index-aligned with the input positions.
    pub shares: Vec<u64>,
    /// Capital deployed, the sum of per-position cost rounded to cents.
    pub capital_invested: f64,
    /// Capital left over, rounded to cents.
    pub capital_remaining: f64,
}

/// Size positions for `positions` out of `total_capital` split into `slots`.
///
/// For an equal-weight portfolio `slots` is `positions.len()`; for a
/// momentum portfolio it is the requested portfolio size, which may exceed
/// the number of ranked positions.
///
/// # Errors
///
/// - [`ScreenError::InvalidConfig`] if `total_capital` is not a positive
///   finite number or `slots` is zero.
/// - [`ScreenError::InvalidPrice`] on the first non-positive or non-finite
///   price; no partial allocation is returned.
/// - [`ScreenError::CapitalExceeded`] if the cent-rounded costs add up to
///   more than `total_capital`.
pub fn allocate<P: Priced>(positions: &[P], total_capital: f64, slots: usize) -> Result<Allocation> {
    if !total_capital.is_finite() || total_capital <= 0.0 {
        return Err(ScreenError::InvalidConfig(format!(
            "portfolio amount must be positive, got {total_capital}"
        )));
    }
    if slots == 0 {
        return Err(ScreenError::InvalidConfig(
            "portfolio must have at least one position".to_string(),
        ));
    }

    let position_size = total_capital / slots as f64;
    let mut shares = Vec::with_capacity(positions.len());
    let mut invested = 0.0;

    for position in positions {
        let price = position.price();
        if !price.is_finite() || price <= 0.0 {
            return Err(ScreenError::InvalidPrice {
                symbol: position.symbol().to_string(),
                price,
            });
        }
        let count = (position_size / price).floor() as u64;
        invested += round_to_cents(count as f64 * price);
        shares.push(count);
    }

    let capital_invested = round_to_cents(invested);
    if capital_invested > total_capital {
        return Err(ScreenError::CapitalExceeded {
            invested: capital_invested,
            total: total_capital,
        });
    }
    let allocation = Allocation {
        position_size,
        shares,
        capital_invested,
        capital_remaining: round_to_cents(total_capital - capital_invested),
    };
    tracing::debug!(
        positions = positions.len(),
        slots,
        position_size,
        invested = allocation.capital_invested,
        remaining = allocation.capital_remaining,
        "allocated portfolio"
    );
    Ok(allocation)
}
