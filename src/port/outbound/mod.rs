//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: exchange price
//! feeds, snapshot persistence, and notification delivery.

pub mod notifier;
pub mod price;
pub mod snapshot;
