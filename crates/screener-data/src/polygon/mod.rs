//! Polygon market-data provider.

pub mod client;
mod wire;

pub use client::PolygonClient;
