//! Infrastructure configuration modules.

pub mod exchange;
pub mod logging;
pub mod polling;
pub mod settings;
pub mod snapshot;
pub mod telegram;

pub use settings::Config;
