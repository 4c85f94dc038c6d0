//! Inbound adapters (driving side).

#[cfg(feature = "telegram")]
pub mod telegram;
