#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod allocation;
pub mod config;
pub mod equal_weight;
pub mod error;
pub mod ranking;
pub mod universe;
pub mod window;

pub use screener_data as data;

pub use allocation::{Allocation, Priced, allocate, round_to_cents};
pub use config::ScreenerConfig;
pub use equal_weight::{EqualWeightCandidates, equal_weight_candidates};
pub use error::{Result, ScreenError};
pub use ranking::{RankedEntry, Ranking, percent_change, rank_returns};
pub use universe::{IndexUniverse, Universe};
pub use window::{ChangeWindow, DateWindow, latest_session};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
