//! Index universe management.
//!
//! A universe is the list of constituent symbols a screen draws from. It is
//! loaded once per run from a [`UniverseSource`] and then queried read-only.

use crate::error::{Result, ScreenError};
use screener_data::UniverseSource;
use std::collections::HashSet;

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe, in source order.
    fn symbols(&self) -> &[String];

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

/// Constituents of an index, deduplicated, in source order.
#[derive(Debug, Clone, Default)]
pub struct IndexUniverse {
    symbols: Vec<String>,
    members: HashSet<String>,
}

impl IndexUniverse {
    /// Build a universe from a symbol list, keeping the first occurrence of
    /// each symbol.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut universe = Self::default();
        for symbol in symbols {
            let symbol = symbol.into();
            if universe.members.insert(symbol.clone()) {
                universe.symbols.push(symbol);
            }
        }
        universe
    }

    /// Fetch the constituents from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Unavailable`] if the fetch fails and
    /// [`ScreenError::NoData`] if the source lists no symbols.
    pub async fn load<S: UniverseSource>(source: &S) -> Result<Self> {
        let universe = Self::from_symbols(source.index_constituents().await?);
        if universe.symbols.is_empty() {
            return Err(ScreenError::NoData("index universe is empty".to_string()));
        }
        tracing::info!(constituents = universe.size(), "loaded index universe");
        Ok(universe)
    }
}

impl Universe for IndexUniverse {
    fn symbols(&self) -> &[String] {
        &self.symbols
    }

    fn contains(&self, symbol: &str) -> bool {
        self.members.contains(symbol)
    }
}
