//! Exchange-agnostic domain types.
//!
//! - [`alert`] - Alerts, crossing direction, and the crossing detector
//! - [`exchange`] - The closed set of supported exchanges
//! - [`symbol`] - Canonical `<BASE>USDT` symbols
//! - [`id`] - Chat and alert identifiers
//! - [`money`] - Price parsing and rendering
//! - [`pending`] - Alerts waiting for an exchange choice
//! - [`error`] - User-facing validation errors

pub mod alert;
pub mod error;
pub mod exchange;
pub mod id;
pub mod money;
pub mod pending;
pub mod symbol;

pub use alert::{crossed, Alert, Direction};
pub use error::AlertError;
pub use exchange::Exchange;
pub use id::{AlertId, ChatId};
pub use money::{format_price, format_price_grouped, parse_price, Price};
pub use pending::PendingSelection;
pub use symbol::Symbol;
