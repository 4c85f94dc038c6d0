//! Composition root.
//!
//! Builds the store, price sources and command service from [`Config`], then
//! runs the poller alongside the Telegram front end until shutdown.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use crate::adapter::outbound::exchange::{build_client, source_for};
use crate::adapter::outbound::snapshot::JsonFileSnapshotStore;
use crate::application::{AlertPoller, AlertService, AlertStore, PendingSelections, PriceSources};
use crate::domain::Exchange;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{LogSink, NotificationSink};

/// Options that only make sense on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Log notifications instead of sending them, and skip the bot.
    pub dry_run: bool,
}

/// Wired application components.
pub struct App {
    pub store: Arc<AlertStore>,
    pub sources: Arc<PriceSources>,
    pub service: Arc<AlertService>,
    config: Config,
}

impl App {
    /// Load the snapshot and build every component.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file exists but cannot be read or
    /// decoded.
    #[allow(clippy::result_large_err)]
    pub fn build(config: &Config) -> Result<Self> {
        let persistence = Arc::new(JsonFileSnapshotStore::new(config.snapshot.path.clone()));
        let store = Arc::new(AlertStore::open(persistence)?);
        let sources = Arc::new(build_price_sources(config));
        let service = Arc::new(AlertService::new(
            Arc::clone(&store),
            Arc::new(PendingSelections::new()),
            Arc::clone(&sources),
        ));
        info!(
            alerts = store.len(),
            next_id = %store.next_id(),
            snapshot = %config.snapshot.path.display(),
            "Alert store loaded"
        );
        Ok(Self {
            store,
            sources,
            service,
            config: config.clone(),
        })
    }

    /// Build the poller that delivers through `sink`.
    #[must_use]
    pub fn poller(&self, sink: Arc<dyn NotificationSink>) -> Arc<AlertPoller> {
        Arc::new(AlertPoller::new(
            Arc::clone(&self.store),
            Arc::clone(&self.sources),
            sink,
            self.config.polling.poller(),
        ))
    }
}

/// One HTTP client shared by a source per exchange.
#[must_use]
pub fn build_price_sources(config: &Config) -> PriceSources {
    let http = build_client(config.http.timeout(), config.http.connect_timeout());
    Exchange::ALL
        .into_iter()
        .fold(PriceSources::new(), |sources, exchange| {
            sources.with(source_for(
                exchange,
                http.clone(),
                config.exchanges.base_url(exchange),
            ))
        })
}

/// Run until `shutdown` flips to `true`.
///
/// # Errors
///
/// Returns an error if the bot token is missing (outside dry-run) or the
/// snapshot cannot be loaded.
pub async fn run(config: &Config, options: RunOptions, shutdown: watch::Receiver<bool>) -> Result<()> {
    if options.dry_run {
        let app = App::build(config)?;
        info!("Dry run: notifications are logged, Telegram is not contacted");
        let poller = app.poller(Arc::new(LogSink)).spawn(shutdown);
        if let Err(e) = poller.await {
            error!(error = %e, "Poller task failed");
        }
        return Ok(());
    }
    serve(config, shutdown).await
}

#[cfg(feature = "telegram")]
async fn serve(config: &Config, shutdown: watch::Receiver<bool>) -> Result<()> {
    use teloxide::Bot;

    use crate::adapter::inbound::telegram::TelegramBot;
    use crate::adapter::outbound::notifier::TelegramSink;
    use crate::error::ConfigError;
    use crate::infrastructure::config::telegram::{TelegramConfig, TOKEN_VAR};

    let telegram = TelegramConfig::from_env().ok_or(ConfigError::MissingField { field: TOKEN_VAR })?;
    let app = App::build(config)?;
    let bot = Bot::new(telegram.bot_token);

    let poller = app
        .poller(Arc::new(TelegramSink::new(bot.clone())))
        .spawn(shutdown.clone());
    TelegramBot::new(bot, app.service.clone()).run(shutdown).await;

    if let Err(e) = poller.await {
        error!(error = %e, "Poller task failed");
    }
    Ok(())
}

#[cfg(not(feature = "telegram"))]
async fn serve(_config: &Config, _shutdown: watch::Receiver<bool>) -> Result<()> {
    Err(crate::error::ConfigError::InvalidValue {
        field: "dry_run",
        reason: "built without the telegram feature; rerun with --dry-run".to_string(),
    }
    .into())
}

/// Flip the returned flag on Ctrl-C.
#[must_use]
pub fn shutdown_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C, shutting down"),
        }
        let _ = tx.send(true);
    });
    rx
}
