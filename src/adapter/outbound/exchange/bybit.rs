//! Bybit v5 linear perpetual ticker.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::{http, parse_text, positive, trim_base};
use crate::domain::{Exchange, Price, Symbol};
use crate::port::{PriceError, PriceSource};

pub const DEFAULT_URL: &str = "https://api.bybit.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TickersResponse {
    pub ret_code: Option<i64>,
    pub result: Option<TickersResult>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TickersResult {
    #[serde(default)]
    pub list: Vec<Ticker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Ticker {
    pub last_price: Option<String>,
}

/// Latest price from Bybit linear perpetuals.
pub struct BybitSource {
    http: HttpClient,
    base_url: String,
}

impl BybitSource {
    #[must_use]
    pub fn new(http: HttpClient, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn ticker_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/v5/market/tickers?category=linear&symbol={symbol}",
            trim_base(&self.base_url)
        )
    }

    /// A non-zero `retCode` or an empty list means the symbol is not listed.
    pub(crate) fn price_from(body: &TickersResponse, symbol: &Symbol) -> Result<Price, PriceError> {
        let price = match (body.ret_code, &body.result) {
            (Some(0), Some(result)) => result
                .list
                .first()
                .and_then(|t| parse_text(t.last_price.as_deref())),
            _ => None,
        };
        positive(price, Exchange::Bybit, symbol)
    }
}

#[async_trait]
impl PriceSource for BybitSource {
    fn exchange(&self) -> Exchange {
        Exchange::Bybit
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Price, PriceError> {
        let body: TickersResponse =
            http::get_json(&self.http, &self.ticker_url(symbol), Exchange::Bybit, symbol).await?;
        Self::price_from(&body, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eth() -> Symbol {
        Symbol::parse("ETH").unwrap()
    }

    #[test]
    fn ticker_url_selects_linear_category() {
        let source = BybitSource::new(HttpClient::new(), DEFAULT_URL.into());
        assert_eq!(
            source.ticker_url(&eth()),
            "https://api.bybit.com/v5/market/tickers?category=linear&symbol=ETHUSDT"
        );
    }

    #[test]
    fn parses_first_ticker() {
        let body: TickersResponse = serde_json::from_str(
            r#"{"retCode":0,"retMsg":"OK","result":{"category":"linear","list":[{"symbol":"ETHUSDT","lastPrice":"3512.7"}]}}"#,
        )
        .unwrap();
        assert_eq!(BybitSource::price_from(&body, &eth()).unwrap(), dec!(3512.7));
    }

    #[test]
    fn error_code_is_not_found() {
        let body: TickersResponse =
            serde_json::from_str(r#"{"retCode":10001,"retMsg":"params error","result":{}}"#).unwrap();
        assert!(BybitSource::price_from(&body, &eth()).unwrap_err().is_not_found());
    }

    #[test]
    fn empty_list_is_not_found() {
        let body: TickersResponse =
            serde_json::from_str(r#"{"retCode":0,"result":{"list":[]}}"#).unwrap();
        assert!(BybitSource::price_from(&body, &eth()).unwrap_err().is_not_found());
    }
}
