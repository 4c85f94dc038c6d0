//! User-facing alert errors.
//!
//! Every variant here is surfaced to the chat that issued the command. None
//! of them are fatal; the process keeps running.

use rust_decimal::Decimal;
use thiserror::Error;

use super::exchange::Exchange;
use super::symbol::Symbol;

/// Errors produced while handling an alert command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// The price argument could not be parsed or is not positive.
    #[error("invalid price `{0}`")]
    InvalidPrice(String),

    /// The exchange is not one of the supported set.
    #[error("invalid exchange `{0}`. Supported: binance, bybit, bitget, mexc")]
    UnsupportedExchange(String),

    /// A removal identifier was neither a valid position nor a symbol.
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    /// The symbol contains characters a pair name cannot have.
    #[error("invalid symbol `{0}`")]
    InvalidSymbol(String),

    /// Target equals the price at creation, so no crossing direction exists.
    #[error("target {target} equals the current {symbol} price; pick a price above or below it")]
    DegenerateTarget {
        /// Symbol the alert was requested for.
        symbol: Symbol,
        /// The requested target.
        target: Decimal,
    },

    /// The exchange does not list the symbol.
    #[error("symbol {symbol} not found on {}", exchange.label())]
    SymbolNotFound {
        /// Symbol that was looked up.
        symbol: Symbol,
        /// Exchange that was queried.
        exchange: Exchange,
    },

    /// The exchange could not be reached or returned garbage.
    #[error("could not fetch {symbol} from {}, try again shortly", exchange.label())]
    PriceUnavailable {
        /// Symbol that was looked up.
        symbol: Symbol,
        /// Exchange that was queried.
        exchange: Exchange,
    },

    /// The chat has no active alerts.
    #[error("no active alerts")]
    NoAlerts,

    /// Nothing matched the removal identifier.
    #[error("no alert found for {0}")]
    AlertNotFound(String),

    /// An exchange was chosen but no alert was waiting for one.
    #[error("alert expired, please try again")]
    SelectionExpired,
}
