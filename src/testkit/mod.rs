//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`price`] - [`ScriptedPriceSource`](price::ScriptedPriceSource), a
//!   [`PriceSource`](crate::port::PriceSource) that replays queued quotes.
//! - [`sink`] - [`RecordingSink`](sink::RecordingSink), a notification sink
//!   that records deliveries and can be told to fail.
//! - [`snapshot`] - [`MemorySnapshotStore`](snapshot::MemorySnapshotStore).
//! - [`domain`] - Builders for symbols and alerts.

pub mod domain;
pub mod price;
pub mod sink;
pub mod snapshot;
