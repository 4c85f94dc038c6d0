//! Supported exchanges.
//!
//! The set is closed: adding an exchange means adding a variant here and one
//! price source adapter. Everything else dispatches on [`Exchange`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AlertError;
use super::symbol::Symbol;

/// A futures exchange that can quote `<BASE>USDT` perpetuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Bybit,
    Bitget,
    Mexc,
}

impl Exchange {
    /// Every supported exchange, in display order.
    pub const ALL: [Exchange; 4] = [
        Exchange::Binance,
        Exchange::Bybit,
        Exchange::Bitget,
        Exchange::Mexc,
    ];

    /// Lowercase wire name, as stored in snapshots and callback data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binance => "binance",
            Self::Bybit => "bybit",
            Self::Bitget => "bitget",
            Self::Mexc => "mexc",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Binance => "Binance",
            Self::Bybit => "Bybit",
            Self::Bitget => "Bitget",
            Self::Mexc => "MEXC",
        }
    }

    /// Marker shown next to the exchange in chat messages.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Binance => "🟡",
            Self::Bybit => "🟠",
            Self::Bitget => "🌐",
            Self::Mexc => "🔵",
        }
    }

    /// Futures trading page for `symbol` in a desktop browser.
    #[must_use]
    pub fn desktop_url(self, symbol: &Symbol) -> String {
        match self {
            Self::Binance => format!("https://www.binance.com/en/futures/{symbol}"),
            Self::Bybit => format!("https://www.bybit.com/trade/usdt/{symbol}"),
            Self::Bitget => format!("https://www.bitget.com/en/futures/usdt/{symbol}"),
            Self::Mexc => format!(
                "https://futures.mexc.com/exchange/{}",
                symbol.separated("_")
            ),
        }
    }

    /// Futures trading page for `symbol` on the exchange's mobile site.
    #[must_use]
    pub fn mobile_url(self, symbol: &Symbol) -> String {
        match self {
            Self::Binance => format!("https://app.binance.com/en/futures/{symbol}"),
            Self::Bybit => format!("https://m.bybit.com/trade/usdt/{symbol}"),
            Self::Bitget => format!("https://m.bitget.com/en/futures/usdt/{symbol}"),
            Self::Mexc => format!("https://m.mexc.com/futures/{}", symbol.separated("_")),
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|exchange| exchange.as_str() == needle)
            .ok_or_else(|| AlertError::UnsupportedExchange(s.trim().to_string()))
    }
}
