//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod price;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pricealert - Telegram price alerts for crypto futures.
#[derive(Parser, Debug)]
#[command(name = "pricealert")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the alert bot (foreground)
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Fetch one price from one exchange
    Price(PriceArgs),

    /// Compare a symbol's price across every exchange
    Compare(CompareArgs),
}

/// Subcommands for `pricealert check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file and environment
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Log notifications instead of sending them; no bot token needed
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `price` subcommand.
#[derive(Parser, Debug)]
pub struct PriceArgs {
    /// Symbol, with or without the USDT suffix
    pub symbol: String,

    /// Exchange to query (binance, bybit, bitget, mexc)
    #[arg(short, long, default_value = "binance")]
    pub exchange: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `compare` subcommand.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Symbol, with or without the USDT suffix
    pub symbol: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}
