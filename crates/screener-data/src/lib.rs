#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod constituents;
pub mod error;
pub mod polygon;
pub mod sandbox;
pub mod source;
pub mod types;

pub use config::ProviderConfig;
pub use constituents::WikiTableClient;
pub use error::{DataError, Result};
pub use polygon::PolygonClient;
pub use sandbox::SandboxMarketData;
pub use source::{MarketDataSource, UniverseSource};
pub use types::{PriceBar, PriceSnapshot, TickerRecord, round_to_cents};

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
