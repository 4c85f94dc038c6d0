//! Poller timing configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::PollerConfig;

const fn default_interval_secs() -> u64 {
    10
}

const fn default_max_concurrent_fetches() -> usize {
    8
}

/// `[polling]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Seconds between evaluation ticks (default: 10).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Price requests in flight per tick (default: 8).
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

impl PollingConfig {
    #[must_use]
    pub fn poller(&self) -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(self.interval_secs),
            max_concurrent_fetches: self.max_concurrent_fetches,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}
