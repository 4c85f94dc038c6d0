//! Telegram message parsing.
//!
//! Slash commands map one-to-one onto [`Command`]; any other text is read as
//! `SYMBOL PRICE [EXCHANGE]`.

use thiserror::Error;

use crate::domain::{parse_price, AlertError, Exchange, Symbol};
use crate::port::{Command, RemoveTarget};

/// Why a message could not be turned into a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty message")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid format.\n\nSimple: BTC 96000\nWith exchange: BTC 96000 bybit")]
    InvalidFormat,

    #[error(transparent)]
    Invalid(#[from] AlertError),
}

const REMOVE_USAGE: &str = "/remove BTC or /remove 1 (alert number)";
const COMPARE_USAGE: &str = "/compare BTC";

/// Parse a text message into a command.
pub fn parse_message(text: &str) -> Result<Command, CommandParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandParseError::Empty);
    }
    if text.starts_with('/') {
        parse_slash(text)
    } else {
        parse_alert_request(text)
    }
}

fn parse_slash(text: &str) -> Result<Command, CommandParseError> {
    let mut parts = text.split_whitespace();
    let raw_command = parts.next().ok_or(CommandParseError::Empty)?;
    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head)
        .to_ascii_lowercase();

    match command.as_str() {
        "/start" => Ok(Command::Start),
        "/help" => Ok(Command::Help),
        "/list" => Ok(Command::List),
        "/clear" => Ok(Command::Clear),
        "/compare" => {
            let raw = parts.next().ok_or(CommandParseError::Usage(COMPARE_USAGE))?;
            Ok(Command::Compare {
                symbol: Symbol::parse(raw)?,
            })
        }
        "/remove" => {
            let raw = parts.next().ok_or(CommandParseError::Usage(REMOVE_USAGE))?;
            Ok(Command::Remove {
                target: parse_remove_target(raw)?,
            })
        }
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_remove_target(raw: &str) -> Result<RemoveTarget, AlertError> {
    if let Ok(position) = raw.parse::<usize>() {
        return Ok(RemoveTarget::Position(position));
    }
    Symbol::parse(raw)
        .map(RemoveTarget::Symbol)
        .map_err(|_| AlertError::InvalidIdentifier(raw.to_string()))
}

fn parse_alert_request(text: &str) -> Result<Command, CommandParseError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (raw_symbol, raw_price, raw_exchange) = match parts.as_slice() {
        [symbol, price] => (*symbol, *price, None),
        [symbol, price, exchange] => (*symbol, *price, Some(*exchange)),
        _ => return Err(CommandParseError::InvalidFormat),
    };

    let symbol = Symbol::parse(raw_symbol)?;
    let target = parse_price(raw_price)?;
    let exchange = raw_exchange.map(str::parse::<Exchange>).transpose()?;
    Ok(Command::Create {
        symbol,
        target,
        exchange,
    })
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Welcome and usage"),
        ("help", "Usage and supported exchanges"),
        ("list", "Show active alerts"),
        ("compare", "Compare a price across exchanges"),
        ("remove", "Remove alert(s) by number or symbol"),
        ("clear", "Clear all alerts"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn parses_plain_commands() {
        assert_eq!(parse_message("/start").unwrap(), Command::Start);
        assert_eq!(parse_message("/help").unwrap(), Command::Help);
        assert_eq!(parse_message("/list").unwrap(), Command::List);
        assert_eq!(parse_message("/clear").unwrap(), Command::Clear);
    }

    #[test]
    fn strips_bot_mention() {
        assert_eq!(parse_message("/list@price_alert_bot").unwrap(), Command::List);
    }

    #[test]
    fn remove_by_position_or_symbol() {
        assert_eq!(
            parse_message("/remove 2").unwrap(),
            Command::Remove {
                target: RemoveTarget::Position(2)
            }
        );
        assert_eq!(
            parse_message("/remove btc").unwrap(),
            Command::Remove {
                target: RemoveTarget::Symbol(sym("BTC"))
            }
        );
        assert_eq!(
            parse_message("/remove").unwrap_err(),
            CommandParseError::Usage(REMOVE_USAGE)
        );
        assert!(matches!(
            parse_message("/remove -1").unwrap_err(),
            CommandParseError::Invalid(AlertError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn compare_needs_a_symbol() {
        assert_eq!(
            parse_message("/compare eth").unwrap(),
            Command::Compare { symbol: sym("ETH") }
        );
        assert!(matches!(
            parse_message("/compare").unwrap_err(),
            CommandParseError::Usage(_)
        ));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_message("/pause").unwrap_err(),
            CommandParseError::UnknownCommand("/pause".into())
        );
    }

    #[test]
    fn free_text_alert_without_exchange() {
        assert_eq!(
            parse_message("eth 4,000").unwrap(),
            Command::Create {
                symbol: sym("ETH"),
                target: dec!(4000),
                exchange: None,
            }
        );
    }

    #[test]
    fn free_text_alert_with_exchange() {
        assert_eq!(
            parse_message("BTC 90000 Binance").unwrap(),
            Command::Create {
                symbol: sym("BTC"),
                target: dec!(90000),
                exchange: Some(Exchange::Binance),
            }
        );
    }

    #[test]
    fn free_text_errors() {
        assert_eq!(
            parse_message("BTC").unwrap_err(),
            CommandParseError::InvalidFormat
        );
        assert_eq!(
            parse_message("BTC 1 binance extra").unwrap_err(),
            CommandParseError::InvalidFormat
        );
        assert!(matches!(
            parse_message("BTC abc").unwrap_err(),
            CommandParseError::Invalid(AlertError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_message("BTC 100 kraken").unwrap_err(),
            CommandParseError::Invalid(AlertError::UnsupportedExchange(_))
        ));
    }

    #[test]
    fn menu_covers_every_command() {
        let names: Vec<_> = bot_commands().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["start", "help", "list", "compare", "remove", "clear"]);
    }
}
