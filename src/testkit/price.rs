//! Scripted [`PriceSource`] for tests.
//!
//! Each symbol has its own queue of outcomes. A fetch pops the next outcome;
//! once a queue is down to its last entry that entry repeats, so a test can
//! script "95000, 93000, then stay at 91000". Unknown symbols are
//! `NotFound`.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Exchange, Price, Symbol};
use crate::port::{PriceError, PriceSource};

/// One scripted fetch result.
#[derive(Debug, Clone)]
pub enum Quote {
    Price(Price),
    NotFound,
    Transient,
}

/// A price source that replays queued quotes per symbol.
pub struct ScriptedPriceSource {
    exchange: Exchange,
    quotes: Mutex<HashMap<Symbol, VecDeque<Quote>>>,
    fetches: Arc<AtomicU32>,
}

impl ScriptedPriceSource {
    pub fn new(exchange: Exchange) -> Self {
        Self {
            exchange,
            quotes: Mutex::new(HashMap::new()),
            fetches: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Queue prices for a symbol.
    pub fn with_prices(self, symbol: &str, prices: impl IntoIterator<Item = Price>) -> Self {
        self.push(symbol, prices.into_iter().map(Quote::Price));
        self
    }

    /// Queue arbitrary outcomes for a symbol.
    pub fn with_quotes(self, symbol: &str, quotes: impl IntoIterator<Item = Quote>) -> Self {
        self.push(symbol, quotes);
        self
    }

    /// Append outcomes to a symbol's queue.
    pub fn push(&self, symbol: &str, quotes: impl IntoIterator<Item = Quote>) {
        let symbol = Symbol::parse(symbol).expect("valid test symbol");
        self.quotes
            .lock()
            .entry(symbol)
            .or_default()
            .extend(quotes);
    }

    /// Replace a symbol's queue.
    pub fn set(&self, symbol: &str, quotes: impl IntoIterator<Item = Quote>) {
        let symbol = Symbol::parse(symbol).expect("valid test symbol");
        self.quotes
            .lock()
            .insert(symbol, quotes.into_iter().collect());
    }

    /// Shared fetch counter.
    pub fn fetch_counter(&self) -> Arc<AtomicU32> {
        self.fetches.clone()
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for ScriptedPriceSource {
    fn exchange(&self) -> Exchange {
        self.exchange
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Price, PriceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let quote = {
            let mut quotes = self.quotes.lock();
            match quotes.get_mut(symbol) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        match quote {
            Some(Quote::Price(price)) => Ok(price),
            Some(Quote::Transient) => Err(PriceError::Transient {
                exchange: self.exchange,
                symbol: symbol.clone(),
                reason: "scripted failure".into(),
            }),
            Some(Quote::NotFound) | None => Err(PriceError::NotFound {
                exchange: self.exchange,
                symbol: symbol.clone(),
            }),
        }
    }
}
