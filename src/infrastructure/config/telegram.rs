//! Telegram bot credentials.

/// Primary environment variable holding the bot token.
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Fallback variable name.
pub const FALLBACK_TOKEN_VAR: &str = "TOKEN";

/// Bot credentials. The token never comes from the config file.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
}

impl TelegramConfig {
    /// Read the token from `TELEGRAM_BOT_TOKEN`, falling back to `TOKEN`.
    ///
    /// Returns `None` if neither is set to a non-blank value.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        [TOKEN_VAR, FALLBACK_TOKEN_VAR]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|token| token.trim().to_string())
            .find(|token| !token.is_empty())
            .map(|bot_token| Self { bot_token })
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear() {
        std::env::remove_var(TOKEN_VAR);
        std::env::remove_var(FALLBACK_TOKEN_VAR);
    }

    #[test]
    fn missing_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        assert!(TelegramConfig::from_env().is_none());
    }

    #[test]
    fn primary_variable_wins() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        std::env::set_var(TOKEN_VAR, "primary");
        std::env::set_var(FALLBACK_TOKEN_VAR, "fallback");
        assert_eq!(TelegramConfig::from_env().unwrap().bot_token, "primary");
        clear();
    }

    #[test]
    fn falls_back_to_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear();
        std::env::set_var(FALLBACK_TOKEN_VAR, " fallback ");
        assert_eq!(TelegramConfig::from_env().unwrap().bot_token, "fallback");
        clear();
    }

    #[test]
    fn redacts_token_in_debug() {
        let config = TelegramConfig {
            bot_token: "secret".into(),
        };
        assert!(!format!("{config:?}").contains("secret"));
    }
}
