//! Configuration validation command.

use std::path::Path;

use crate::cli::output;
use crate::domain::Exchange;
use crate::error::Result;
use crate::infrastructure::config::telegram::{TelegramConfig, FALLBACK_TOKEN_VAR, TOKEN_VAR};
use crate::infrastructure::config::Config;

/// Validate configuration file and environment without starting the bot.
///
/// A missing file is not an error; the defaults are shown instead.
pub fn execute_config(path: &Path) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!("Checking {}", path.display()));
    println!();

    if !path.exists() {
        output::warning("Configuration file not found, using defaults");
    }
    let config = Config::load_or_default(path)?;
    output::success("Configuration is valid");
    println!();

    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);
    output::field("Interval", format!("{}s", config.polling.interval_secs));
    output::field("Concurrency", config.polling.max_concurrent_fetches);
    output::field("Snapshot", config.snapshot.path.display());
    output::field("HTTP timeout", format!("{}ms", config.http.timeout_ms));
    for exchange in Exchange::ALL {
        output::field(exchange.label(), config.exchanges.base_url(exchange));
    }
    println!();

    if TelegramConfig::from_env().is_some() {
        output::success("Telegram bot token found");
    } else {
        output::warning(&format!(
            "No bot token: set {TOKEN_VAR} (or {FALLBACK_TOKEN_VAR}), or run with {}",
            output::highlight("--dry-run")
        ));
    }
    Ok(())
}
