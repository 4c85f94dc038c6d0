//! Application layer: the alert engine.
//!
//! - [`store`] - Authoritative alert collection with write-through snapshots
//! - [`pending`] - Alerts waiting for an exchange choice
//! - [`sources`] - Exchange-to-price-source dispatch
//! - [`service`] - Chat command handling
//! - [`poller`] - Periodic crossing evaluation and notification
//! - [`compare`] - Cross-exchange price comparison
//! - [`notification`] - Trigger message payloads

pub mod compare;
pub mod notification;
pub mod pending;
pub mod poller;
pub mod service;
pub mod sources;
pub mod store;

pub use compare::Comparison;
pub use pending::PendingSelections;
pub use poller::{AlertPoller, PollerConfig, TickReport};
pub use service::AlertService;
pub use sources::PriceSources;
pub use store::{AlertStore, Observation};
