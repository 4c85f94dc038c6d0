//! Registry mapping each exchange to its price source.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{Exchange, Price, Symbol};
use crate::port::{PriceError, PriceSource};

/// Dispatches price lookups to the source registered for an exchange.
#[derive(Clone, Default)]
pub struct PriceSources {
    sources: HashMap<Exchange, Arc<dyn PriceSource>>,
}

impl PriceSources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source, replacing any earlier one for the same exchange.
    pub fn register(&mut self, source: Arc<dyn PriceSource>) {
        self.sources.insert(source.exchange(), source);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.register(source);
        self
    }

    /// Registered exchanges in display order.
    #[must_use]
    pub fn exchanges(&self) -> Vec<Exchange> {
        Exchange::ALL
            .into_iter()
            .filter(|exchange| self.sources.contains_key(exchange))
            .collect()
    }

    /// Fetch one price.
    ///
    /// # Errors
    ///
    /// Whatever the source reports, or [`PriceError::Unsupported`] if no
    /// source is registered for `exchange`.
    pub async fn fetch(&self, symbol: &Symbol, exchange: Exchange) -> Result<Price, PriceError> {
        match self.sources.get(&exchange) {
            Some(source) => source.fetch(symbol).await,
            None => Err(PriceError::Unsupported(exchange)),
        }
    }

    /// Fetch `symbol` from every registered exchange concurrently.
    pub async fn fetch_all(&self, symbol: &Symbol) -> Vec<(Exchange, Result<Price, PriceError>)> {
        let exchanges = self.exchanges();
        let results = join_all(exchanges.iter().map(|ex| self.fetch(symbol, *ex))).await;
        exchanges.into_iter().zip(results).collect()
    }
}
