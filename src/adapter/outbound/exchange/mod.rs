//! Exchange price sources.
//!
//! Each adapter hits one public futures ticker endpoint and pulls the last
//! traded price out of the reply. Prices arrive as strings on every venue
//! except MEXC; both forms decode into [`Price`](crate::domain::Price).

mod http;

pub mod binance;
pub mod bitget;
pub mod bybit;
pub mod mexc;

use std::sync::Arc;

pub use binance::BinanceSource;
pub use bitget::BitgetSource;
pub use bybit::BybitSource;
pub use http::build_client;
pub use mexc::MexcSource;

use reqwest::Client as HttpClient;
use rust_decimal::Decimal;

use crate::domain::{Exchange, Price, Symbol};
use crate::port::{PriceError, PriceSource};

/// Build the adapter for `exchange` against `base_url`.
#[must_use]
pub fn source_for(exchange: Exchange, http: HttpClient, base_url: String) -> Arc<dyn PriceSource> {
    match exchange {
        Exchange::Binance => Arc::new(BinanceSource::new(http, base_url)),
        Exchange::Bybit => Arc::new(BybitSource::new(http, base_url)),
        Exchange::Bitget => Arc::new(BitgetSource::new(http, base_url)),
        Exchange::Mexc => Arc::new(MexcSource::new(http, base_url)),
    }
}

/// Default public endpoint for `exchange`.
#[must_use]
pub const fn default_url(exchange: Exchange) -> &'static str {
    match exchange {
        Exchange::Binance => binance::DEFAULT_URL,
        Exchange::Bybit => bybit::DEFAULT_URL,
        Exchange::Bitget => bitget::DEFAULT_URL,
        Exchange::Mexc => mexc::DEFAULT_URL,
    }
}

/// Accept a decoded price only if it is present and positive.
fn positive(price: Option<Decimal>, exchange: Exchange, symbol: &Symbol) -> Result<Price, PriceError> {
    match price {
        Some(p) if p > Decimal::ZERO => Ok(p),
        _ => Err(PriceError::NotFound {
            exchange,
            symbol: symbol.clone(),
        }),
    }
}

/// Parse a price string. Blank or malformed strings count as missing.
fn parse_text(raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?.trim();
    raw.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}
