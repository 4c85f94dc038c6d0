//! HTTP and exchange endpoint configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::exchange::default_url;
use crate::domain::Exchange;

const fn default_timeout_ms() -> u64 {
    5_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

/// `[http]` section shared by every exchange client.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds (default: 5000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (default: 3000).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl HttpConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// `[exchanges]` section: base URL overrides, mostly for tests and proxies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeUrls {
    pub binance_url: Option<String>,
    pub bybit_url: Option<String>,
    pub bitget_url: Option<String>,
    pub mexc_url: Option<String>,
}

impl ExchangeUrls {
    /// Configured base URL for `exchange`, or its public default.
    #[must_use]
    pub fn base_url(&self, exchange: Exchange) -> String {
        let configured = match exchange {
            Exchange::Binance => &self.binance_url,
            Exchange::Bybit => &self.bybit_url,
            Exchange::Bitget => &self.bitget_url,
            Exchange::Mexc => &self.mexc_url,
        };
        configured
            .clone()
            .unwrap_or_else(|| default_url(exchange).to_string())
    }

    /// Config field name for `exchange`, used in validation errors.
    #[must_use]
    pub const fn field(exchange: Exchange) -> &'static str {
        match exchange {
            Exchange::Binance => "binance_url",
            Exchange::Bybit => "bybit_url",
            Exchange::Bitget => "bitget_url",
            Exchange::Mexc => "mexc_url",
        }
    }
}
