//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points of the alert engine. Adapters
//! implement them to integrate exchanges, persistence, and chat transports.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!    Telegram ──────▶│  inbound::CommandHandler│
//!                    │                         │
//!     ┌──────────────┤  Domain + Application   ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌───────────┐          ┌─────────────┐             ┌──────────────────┐
//! │PriceSource│          │SnapshotStore│             │NotificationSink  │
//! └───────────┘          └─────────────┘             └──────────────────┘
//! ```

pub mod inbound;
pub mod outbound;

pub use inbound::command::{Choice, Command, CommandHandler, RemoveTarget, Reply};
pub use outbound::notifier::{DeliveryError, Link, LogSink, Notification, NotificationSink};
pub use outbound::price::{PriceError, PriceSource};
pub use outbound::snapshot::{Snapshot, SnapshotStore};
