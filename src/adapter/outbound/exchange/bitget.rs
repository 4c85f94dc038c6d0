//! Bitget v2 USDT-M futures ticker.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::{http, parse_text, positive, trim_base};
use crate::domain::{Exchange, Price, Symbol};
use crate::port::{PriceError, PriceSource};

pub const DEFAULT_URL: &str = "https://api.bitget.com";

const SUCCESS: &str = "00000";

#[derive(Debug, Deserialize)]
pub(crate) struct TickerResponse {
    pub code: Option<String>,
    #[serde(default)]
    pub data: Vec<Ticker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Ticker {
    pub last_pr: Option<String>,
}

/// Latest price from Bitget USDT futures.
pub struct BitgetSource {
    http: HttpClient,
    base_url: String,
}

impl BitgetSource {
    #[must_use]
    pub fn new(http: HttpClient, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn ticker_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/api/v2/mix/market/ticker?symbol={symbol}&productType=USDT-FUTURES",
            trim_base(&self.base_url)
        )
    }

    pub(crate) fn price_from(body: &TickerResponse, symbol: &Symbol) -> Result<Price, PriceError> {
        let price = if body.code.as_deref() == Some(SUCCESS) {
            body.data
                .first()
                .and_then(|t| parse_text(t.last_pr.as_deref()))
        } else {
            None
        };
        positive(price, Exchange::Bitget, symbol)
    }
}

#[async_trait]
impl PriceSource for BitgetSource {
    fn exchange(&self) -> Exchange {
        Exchange::Bitget
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Price, PriceError> {
        let body: TickerResponse =
            http::get_json(&self.http, &self.ticker_url(symbol), Exchange::Bitget, symbol).await?;
        Self::price_from(&body, symbol)
    }
}
