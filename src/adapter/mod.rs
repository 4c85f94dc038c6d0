//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Drivers of the application (Telegram bot commands)
//! - [`outbound`] - Exchange price feeds, snapshot files, notification sinks

pub mod inbound;
pub mod outbound;
