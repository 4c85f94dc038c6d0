//! Periodic alert evaluation.
//!
//! Each tick takes a copy of every active alert, fetches one price per
//! distinct (exchange, symbol) with bounded concurrency, then evaluates and
//! advances each alert under the store lock. Notifications go out after the
//! lock is released; an alert is only removed once its notification was
//! delivered. A failed delivery leaves the alert active with
//! `last_observed` already advanced, so that particular crossing is not
//! retried.
//!
//! Ticks never overlap: the loop awaits each tick before polling the timer
//! again, and a stop signal is only observed between ticks.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::notification;
use super::sources::PriceSources;
use super::store::AlertStore;
use crate::domain::{Exchange, Price, Symbol};
use crate::port::{NotificationSink, PriceError};

/// Poller timing and fan-out.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Time between ticks. The first tick fires one interval after start.
    pub interval: Duration,
    /// Maximum price requests in flight during a tick.
    pub max_concurrent_fetches: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_concurrent_fetches: 8,
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Alerts in the tick's working copy.
    pub alerts: usize,
    /// Distinct (exchange, symbol) requests made.
    pub fetches: usize,
    /// Alerts skipped because no price was available.
    pub skipped: usize,
    /// Alerts whose target was crossed.
    pub triggered: usize,
    /// Triggered alerts notified and removed.
    pub delivered: usize,
    /// Triggered alerts kept because delivery failed.
    pub delivery_failures: usize,
}

type QuoteKey = (Exchange, Symbol);

/// Drives the crossing detector on a fixed interval.
pub struct AlertPoller {
    store: Arc<AlertStore>,
    sources: Arc<PriceSources>,
    sink: Arc<dyn NotificationSink>,
    config: PollerConfig,
}

impl AlertPoller {
    #[must_use]
    pub fn new(
        store: Arc<AlertStore>,
        sources: Arc<PriceSources>,
        sink: Arc<dyn NotificationSink>,
        config: PollerConfig,
    ) -> Self {
        Self {
            store,
            sources,
            sink,
            config,
        }
    }

    /// Run [`run`](Self::run) on a background task.
    pub fn spawn(self: Arc<Self>, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    /// Tick until the shutdown flag flips to `true` or its sender is dropped,
    /// then flush the store.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            interval_secs = self.config.interval.as_secs_f64(),
            max_concurrent_fetches = self.config.max_concurrent_fetches,
            "Alert poller started"
        );

        while !*shutdown.borrow() {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() {
                        info!("Shutdown channel closed");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let report = self.tick().await;
                    if report.alerts > 0 {
                        debug!(
                            alerts = report.alerts,
                            fetches = report.fetches,
                            skipped = report.skipped,
                            triggered = report.triggered,
                            delivered = report.delivered,
                            delivery_failures = report.delivery_failures,
                            "Tick complete"
                        );
                    }
                }
            }
        }

        match self.store.flush() {
            Ok(()) => info!(alerts = self.store.len(), "Alert poller stopped, snapshot flushed"),
            Err(e) => error!(error = %e, "Alert poller stopped, final snapshot failed"),
        }
    }

    /// Evaluate every active alert once.
    pub async fn tick(&self) -> TickReport {
        let alerts = self.store.all();
        let mut report = TickReport {
            alerts: alerts.len(),
            ..TickReport::default()
        };
        if alerts.is_empty() {
            return report;
        }

        let keys: BTreeSet<QuoteKey> = alerts
            .iter()
            .map(|(_, _, alert)| (alert.exchange, alert.symbol.clone()))
            .collect();
        report.fetches = keys.len();

        let quotes: HashMap<QuoteKey, Result<Price, PriceError>> = stream::iter(keys)
            .map(|key| self.quote(key))
            .buffer_unordered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        for (chat, id, alert) in alerts {
            let key = (alert.exchange, alert.symbol);
            let price = match quotes.get(&key) {
                Some(Ok(price)) => *price,
                Some(Err(e)) => {
                    debug!(%chat, alert_id = %id, error = %e, "No price this tick");
                    report.skipped += 1;
                    continue;
                }
                None => continue,
            };

            // Removed since the tick started.
            let Some(observation) = self.store.observe(chat, id, price) else {
                continue;
            };
            if !observation.triggered {
                continue;
            }
            report.triggered += 1;

            let message = notification::triggered(chat, &observation.alert, price, Local::now());
            match self.sink.deliver(&message).await {
                Ok(()) => {
                    self.store.remove(chat, id);
                    report.delivered += 1;
                    info!(
                        %chat,
                        alert_id = %id,
                        symbol = %observation.alert.symbol,
                        exchange = %observation.alert.exchange,
                        target = %observation.alert.target,
                        %price,
                        "Alert triggered"
                    );
                }
                Err(e) => {
                    report.delivery_failures += 1;
                    error!(%chat, alert_id = %id, error = %e, "Failed to deliver alert, keeping it active");
                }
            }
        }

        report
    }

    async fn quote(&self, key: QuoteKey) -> (QuoteKey, Result<Price, PriceError>) {
        let result = self.sources.fetch(&key.1, key.0).await;
        if let Err(PriceError::Transient { reason, .. }) = &result {
            warn!(exchange = %key.0, symbol = %key.1, %reason, "Price fetch failed");
        }
        (key, result)
    }
}
