//! Builders for domain primitives used across tests.

use crate::domain::{Alert, Exchange, Price, Symbol};

/// Parse a symbol, panicking on invalid input.
pub fn symbol(input: &str) -> Symbol {
    Symbol::parse(input).expect("valid test symbol")
}

/// Build an alert on `exchange` created while the price was `initial`.
pub fn alert(input: &str, exchange: Exchange, target: Price, initial: Price) -> Alert {
    Alert::try_new(symbol(input), exchange, target, initial).expect("valid test alert")
}
