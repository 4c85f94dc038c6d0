//! Handler for the `run` command.

use tracing::info;

use crate::cli::RunArgs;
use crate::error::Result;
use crate::infrastructure::bootstrap::{self, RunOptions};
use crate::infrastructure::config::Config;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;

    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    config.init_logging();

    info!(
        config = %args.config.display(),
        interval_secs = config.polling.interval_secs,
        snapshot = %config.snapshot.path.display(),
        dry_run = args.dry_run,
        "pricealert starting"
    );

    let shutdown = bootstrap::shutdown_on_ctrl_c();
    bootstrap::run(
        &config,
        RunOptions {
            dry_run: args.dry_run,
        },
        shutdown,
    )
    .await?;

    info!("pricealert stopped");
    Ok(())
}
