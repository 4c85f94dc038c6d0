//! Shared HTTP plumbing for exchange tickers.

use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{Exchange, Symbol};
use crate::port::PriceError;

/// Build the client shared by every exchange adapter.
#[must_use]
pub fn build_client(timeout: Duration, connect_timeout: Duration) -> HttpClient {
    HttpClient::builder()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        })
}

/// Classify a non-success status.
///
/// Client errors mean the exchange rejected the symbol, except rate limiting
/// which is worth another try next tick.
pub(super) fn classify_status(status: StatusCode, exchange: Exchange, symbol: &Symbol) -> PriceError {
    if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
        PriceError::NotFound {
            exchange,
            symbol: symbol.clone(),
        }
    } else {
        PriceError::Transient {
            exchange,
            symbol: symbol.clone(),
            reason: format!("HTTP {status}"),
        }
    }
}

/// GET `url` once and decode the JSON body.
pub(super) async fn get_json<T>(
    http: &HttpClient,
    url: &str,
    exchange: Exchange,
    symbol: &Symbol,
) -> Result<T, PriceError>
where
    T: DeserializeOwned,
{
    let transient = |reason: String| PriceError::Transient {
        exchange,
        symbol: symbol.clone(),
        reason,
    };

    debug!(%exchange, %symbol, url, "Fetching ticker");
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| transient(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(classify_status(status, exchange, symbol));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| transient(format!("undecodable response: {e}")))
}
