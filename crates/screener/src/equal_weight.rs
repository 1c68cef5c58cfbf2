//! Candidate selection for the equal-weight screen.

use crate::universe::Universe;
use screener_data::{PriceSnapshot, TickerRecord};

/// Universe members priced in a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EqualWeightCandidates {
    /// Members with a close, in universe order. Market cap is not yet set.
    pub records: Vec<TickerRecord>,
    /// Members absent from the snapshot.
    pub unavailable: Vec<String>,
}

/// Pair every universe member with its close in `snapshot`.
pub fn equal_weight_candidates<U>(universe: &U, snapshot: &PriceSnapshot) -> EqualWeightCandidates
where
    U: Universe + ?Sized,
{
    let mut candidates = EqualWeightCandidates::default();
    for symbol in universe.symbols() {
        match snapshot.get(symbol) {
            Some(bar) => candidates
                .records
                .push(TickerRecord::new(symbol.clone(), bar.close)),
            None => candidates.unavailable.push(symbol.clone()),
        }
    }
    candidates
}
