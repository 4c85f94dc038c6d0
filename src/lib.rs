//! Pricealert - Telegram price alerts for crypto perpetual futures.
//!
//! Users register a target price for a `<BASE>USDT` pair on one of four
//! exchanges. A background poller samples the last traded price on a fixed
//! interval and notifies the chat once the price crosses the target, then
//! retires the alert. Active alerts survive restarts through a JSON snapshot.
//!
//! # Architecture
//!
//! - [`domain`] - Alerts, symbols, exchanges and the crossing rule
//! - [`port`] - Traits at the edges: price sources, snapshots, notifications,
//!   chat commands
//! - [`adapter`] - Exchange REST clients, the snapshot file, Telegram
//! - [`application`] - Alert store, command service, poller
//! - [`infrastructure`] - Configuration and wiring
//! - [`cli`] - `run`, `check config`, `price`, `compare`
//!
//! # Features
//!
//! - `telegram` (default) - Telegram bot front end and notification sink
//! - `testkit` - Scripted test doubles for integration tests

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
