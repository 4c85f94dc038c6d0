//! MEXC contract ticker.
//!
//! MEXC spells pairs with an underscore (`BTC_USDT`) and returns the price as
//! a JSON number.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{http, positive, trim_base};
use crate::domain::{Exchange, Price, Symbol};
use crate::port::{PriceError, PriceSource};

pub const DEFAULT_URL: &str = "https://contract.mexc.com";

#[derive(Debug, Deserialize)]
pub(crate) struct TickerResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<Ticker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Ticker {
    pub last_price: Option<Decimal>,
}

/// Latest price from MEXC perpetual contracts.
pub struct MexcSource {
    http: HttpClient,
    base_url: String,
}

impl MexcSource {
    #[must_use]
    pub fn new(http: HttpClient, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn ticker_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/api/v1/contract/ticker?symbol={}",
            trim_base(&self.base_url),
            symbol.separated("_")
        )
    }

    pub(crate) fn price_from(body: &TickerResponse, symbol: &Symbol) -> Result<Price, PriceError> {
        let price = if body.success {
            body.data.as_ref().and_then(|t| t.last_price)
        } else {
            None
        };
        positive(price, Exchange::Mexc, symbol)
    }
}

#[async_trait]
impl PriceSource for MexcSource {
    fn exchange(&self) -> Exchange {
        Exchange::Mexc
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Price, PriceError> {
        let body: TickerResponse =
            http::get_json(&self.http, &self.ticker_url(symbol), Exchange::Mexc, symbol).await?;
        Self::price_from(&body, symbol)
    }
}
