//! Telegram bot front end.
//!
//! Requires the `telegram` feature to be enabled.

mod command;

pub mod bot;

pub use bot::TelegramBot;
pub use command::{bot_commands, parse_message, CommandParseError};
