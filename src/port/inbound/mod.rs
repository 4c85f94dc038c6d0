//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`command`]: The transport-neutral chat command surface

pub mod command;
