//! Binance USDⓈ-M futures ticker.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::{http, parse_text, positive, trim_base};
use crate::domain::{Exchange, Price, Symbol};
use crate::port::{PriceError, PriceSource};

pub const DEFAULT_URL: &str = "https://fapi.binance.com";

/// `GET /fapi/v1/ticker/price` reply.
#[derive(Debug, Deserialize)]
pub(crate) struct TickerPrice {
    pub price: Option<String>,
}

/// Latest price from Binance futures.
pub struct BinanceSource {
    http: HttpClient,
    base_url: String,
}

impl BinanceSource {
    #[must_use]
    pub fn new(http: HttpClient, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn ticker_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/fapi/v1/ticker/price?symbol={symbol}",
            trim_base(&self.base_url)
        )
    }

    pub(crate) fn price_from(body: &TickerPrice, symbol: &Symbol) -> Result<Price, PriceError> {
        positive(parse_text(body.price.as_deref()), Exchange::Binance, symbol)
    }
}

#[async_trait]
impl PriceSource for BinanceSource {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Price, PriceError> {
        let body: TickerPrice =
            http::get_json(&self.http, &self.ticker_url(symbol), Exchange::Binance, symbol).await?;
        Self::price_from(&body, symbol)
    }
}
