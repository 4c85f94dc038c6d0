//! Chat command port.
//!
//! Transports translate their input into a [`Command`] and render the
//! resulting [`Reply`]. Nothing here knows about Telegram.

use async_trait::async_trait;

use crate::domain::{ChatId, Exchange, Price, Symbol};

/// Prefix for the data carried by an exchange choice button.
pub const EXCHANGE_CHOICE_PREFIX: &str = "exchange_";

/// How the user identified the alert(s) to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// 1-based position in the chat's listing.
    Position(usize),
    /// Every alert on this symbol.
    Symbol(Symbol),
}

/// A request from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Greeting with capability listing.
    Start,
    /// Capability listing.
    Help,
    /// Active alerts with current prices.
    List,
    /// One symbol's price on every exchange.
    Compare { symbol: Symbol },
    /// Remove by position or symbol.
    Remove { target: RemoveTarget },
    /// Remove every alert for the chat.
    Clear,
    /// Register an alert. Without an exchange the user is asked to pick one.
    Create {
        symbol: Symbol,
        target: Price,
        exchange: Option<Exchange>,
    },
    /// Answer to an exchange prompt.
    SelectExchange { exchange: Exchange },
}

/// A button offered with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub data: String,
}

impl Choice {
    /// Button that answers an exchange prompt.
    #[must_use]
    pub fn exchange(exchange: Exchange) -> Self {
        Self {
            label: exchange.label().to_string(),
            data: format!("{EXCHANGE_CHOICE_PREFIX}{}", exchange.as_str()),
        }
    }

    /// Decode the exchange from button data, if it is an exchange choice.
    #[must_use]
    pub fn parse_exchange(data: &str) -> Option<Exchange> {
        data.strip_prefix(EXCHANGE_CHOICE_PREFIX)?.parse().ok()
    }
}

/// Text answer to a command, optionally with buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Reply {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// An error reply: `❌` followed by the message, first letter capitalized.
    pub fn error(message: impl std::fmt::Display) -> Self {
        let message = message.to_string();
        let mut chars = message.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self::text(format!("❌ {capitalized}"))
    }

    /// A reply offering buttons.
    pub fn with_choices(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }
}

/// Executes chat commands.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handle a command issued from `chat`.
    async fn handle(&self, chat: ChatId, command: Command) -> Reply;
}
