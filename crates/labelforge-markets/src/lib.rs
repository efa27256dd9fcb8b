//! Market Registry: static per-market regulatory configuration
pub mod config;

pub use config::{config_for, DualLanguage, MarketConfig};

use labelforge_core::MarketCode;

/// Canonical market order for iteration by the orchestrator and UI.
pub fn all_markets() -> &'static [MarketCode] {
    &MarketCode::ALL
}
