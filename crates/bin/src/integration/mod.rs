//! Integration module wiring data sources, screens and reports together.
//!
//! Pipelines here are generic over [`screener_data::MarketDataSource`] and
//! [`screener_data::UniverseSource`], so the same code runs against the live
//! providers and the sandbox.

pub(crate) mod pipeline;
