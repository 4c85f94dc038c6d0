//! Canonical trading pair symbols.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::AlertError;

/// Quote asset every symbol is normalized against.
pub const QUOTE: &str = "USDT";

/// A pair in canonical `<BASE>USDT` form, e.g. `BTCUSDT`.
///
/// Deserializing goes through [`Symbol::parse`], so a stored value is
/// normalized and validated exactly like user input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalize user input into a canonical symbol.
    ///
    /// `btc`, `BTC` and `btcusdt` all become `BTCUSDT`.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::InvalidSymbol`] if the input is empty, contains
    /// anything other than ASCII letters and digits, or is only the quote.
    pub fn parse(input: &str) -> Result<Self, AlertError> {
        let upper = input.trim().to_ascii_uppercase();
        if upper.is_empty() || !upper.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AlertError::InvalidSymbol(input.trim().to_string()));
        }
        let canonical = if upper.ends_with(QUOTE) {
            upper
        } else {
            format!("{upper}{QUOTE}")
        };
        if canonical.len() == QUOTE.len() {
            return Err(AlertError::InvalidSymbol(input.trim().to_string()));
        }
        Ok(Self(canonical))
    }

    /// The canonical symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base asset, e.g. `BTC` for `BTCUSDT`.
    #[must_use]
    pub fn base(&self) -> &str {
        self.0.strip_suffix(QUOTE).unwrap_or(&self.0)
    }

    /// The symbol with `sep` between base and quote, e.g. `BTC_USDT`.
    #[must_use]
    pub fn separated(&self, sep: &str) -> String {
        format!("{}{sep}{QUOTE}", self.base())
    }
}

impl TryFrom<String> for Symbol {
    type Error = AlertError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
