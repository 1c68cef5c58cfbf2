//! Invocation parameters for a screening run.

use crate::error::{Result, ScreenError};
use crate::window::ChangeWindow;

/// Parameters threaded through every stage of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    /// Dollars to allocate.
    pub portfolio_amount: f64,
    /// Number of momentum positions. Ignored by the equal-weight screen.
    pub portfolio_size: usize,
    /// Lookback for momentum returns. Ignored by the equal-weight screen.
    pub change_window: ChangeWindow,
    /// Restrict momentum candidates to index constituents.
    pub spy_only: bool,
    /// Use the deterministic sandbox instead of live providers.
    pub sandbox: bool,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            portfolio_amount: 10_000_000.0,
            portfolio_size: 50,
            change_window: ChangeWindow::OneYear,
            spy_only: false,
            sandbox: false,
        }
    }
}

impl ScreenerConfig {
    /// Check the parameters before any fetch is made.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidConfig`] for a non-positive or non-finite
    /// amount, or a zero portfolio size.
    pub fn validate(&self) -> Result<()> {
        if !self.portfolio_amount.is_finite() || self.portfolio_amount <= 0.0 {
            return Err(ScreenError::InvalidConfig(format!(
                "portfolio amount must be positive, got {}",
                self.portfolio_amount
            )));
        }
        if self.portfolio_size == 0 {
            return Err(ScreenError::InvalidConfig(
                "portfolio size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScreenerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.change_window, ChangeWindow::OneYear);
        assert!(!config.sandbox);
    }

    #[test]
    fn test_rejects_bad_amount_and_size() {
        let config = ScreenerConfig {
            portfolio_amount: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScreenError::InvalidConfig(_))));

        let config = ScreenerConfig {
            portfolio_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScreenError::InvalidConfig(_))));
    }
}
