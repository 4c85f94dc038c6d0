//! Alerts staged while the user picks an exchange.

use super::money::Price;
use super::symbol::Symbol;

/// An alert request that is missing its exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    pub symbol: Symbol,
    pub target: Price,
}
