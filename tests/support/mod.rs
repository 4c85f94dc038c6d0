//! Shared wiring for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pricealert::application::{
    AlertPoller, AlertService, AlertStore, PendingSelections, PollerConfig, PriceSources,
};
use pricealert::domain::Exchange;
use pricealert::port::{PriceSource, SnapshotStore};
use pricealert::testkit::price::ScriptedPriceSource;
use pricealert::testkit::sink::RecordingSink;
use pricealert::testkit::snapshot::MemorySnapshotStore;

/// Service, poller and doubles sharing one store.
pub struct World {
    pub store: Arc<AlertStore>,
    pub service: AlertService,
    pub poller: AlertPoller,
    pub sink: RecordingSink,
    pub sources: Vec<Arc<ScriptedPriceSource>>,
}

impl World {
    pub fn new() -> Self {
        Self::with_persistence(Arc::new(MemorySnapshotStore::new()))
    }

    pub fn with_persistence(persistence: Arc<dyn SnapshotStore>) -> Self {
        let store = Arc::new(AlertStore::open(persistence).expect("open store"));
        let scripted: Vec<Arc<ScriptedPriceSource>> = Exchange::ALL
            .into_iter()
            .map(|e| Arc::new(ScriptedPriceSource::new(e)))
            .collect();
        let sources = Arc::new(
            scripted
                .iter()
                .fold(PriceSources::new(), |acc, s| acc.with(s.clone())),
        );
        let sink = RecordingSink::new();
        let service = AlertService::new(
            store.clone(),
            Arc::new(PendingSelections::new()),
            sources.clone(),
        );
        let poller = AlertPoller::new(
            store.clone(),
            sources,
            Arc::new(sink.clone()),
            PollerConfig::default(),
        );
        Self {
            store,
            service,
            poller,
            sink,
            sources: scripted,
        }
    }

    /// The scripted source for `exchange`.
    pub fn source(&self, exchange: Exchange) -> &ScriptedPriceSource {
        self.sources
            .iter()
            .find(|s| s.exchange() == exchange)
            .expect("source registered")
    }
}
