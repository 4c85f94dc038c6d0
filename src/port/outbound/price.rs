//! Price source port.
//!
//! One implementation per exchange. Each call performs a single request and
//! never retries; callers decide whether a failure means "skip this tick" or
//! "reject this registration".

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AlertError, Exchange, Price, Symbol};

/// Why a price could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The exchange does not list the symbol, or its reply has no price.
    #[error("{symbol} not found on {exchange}")]
    NotFound { exchange: Exchange, symbol: Symbol },

    /// Network, server, or decoding failure. Worth trying again later.
    #[error("{exchange} request for {symbol} failed: {reason}")]
    Transient {
        exchange: Exchange,
        symbol: Symbol,
        reason: String,
    },

    /// No source is registered for the exchange.
    #[error("no price source configured for {0}")]
    Unsupported(Exchange),
}

impl PriceError {
    /// True if the symbol is definitively absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Map to the user-facing error for a registration attempt.
    #[must_use]
    pub fn into_alert_error(self, symbol: &Symbol) -> AlertError {
        match self {
            Self::NotFound { exchange, symbol } => AlertError::SymbolNotFound { symbol, exchange },
            Self::Transient { exchange, symbol, .. } => {
                AlertError::PriceUnavailable { symbol, exchange }
            }
            Self::Unsupported(exchange) => AlertError::PriceUnavailable {
                symbol: symbol.clone(),
                exchange,
            },
        }
    }
}

/// Latest-price feed for a single exchange.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// The exchange this source quotes.
    fn exchange(&self) -> Exchange;

    /// Fetch the last traded price for a canonical symbol.
    async fn fetch(&self, symbol: &Symbol) -> Result<Price, PriceError>;
}
