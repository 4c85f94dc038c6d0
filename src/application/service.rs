//! Command handling for chat transports.
//!
//! [`AlertService`] turns inbound [`Command`]s into store mutations and
//! user-visible [`Reply`]s. Network lookups happen before the store is
//! touched, so a failed lookup never consumes an alert id.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, info};

use super::compare::Comparison;
use super::pending::PendingSelections;
use super::sources::PriceSources;
use super::store::AlertStore;
use crate::domain::{
    format_price, format_price_grouped, Alert, AlertError, ChatId, Direction, Exchange, Price,
    Symbol,
};
use crate::port::{Choice, Command, CommandHandler, RemoveTarget, Reply};

/// Capability listing shown by `/start` and `/help`.
#[must_use]
pub fn help_text() -> String {
    let exchanges: String = Exchange::ALL
        .iter()
        .map(|e| format!("• {}\n", e.label()))
        .collect();
    format!(
        "Usage (Simple):\n\
         BTC 96000\n\
         \n\
         Usage (With Exchange):\n\
         BTC 96000 bybit\n\
         \n\
         Supported exchanges:\n\
         {exchanges}\
         \n\
         Commands:\n\
         /list - Show active alerts\n\
         /compare SYMBOL - Compare price across exchanges\n\
         /remove SYMBOL or /remove N - Remove alert(s)\n\
         /clear - Clear all alerts"
    )
}

/// Executes chat commands against the alert store.
pub struct AlertService {
    store: Arc<AlertStore>,
    pending: Arc<PendingSelections>,
    sources: Arc<PriceSources>,
}

impl AlertService {
    #[must_use]
    pub fn new(
        store: Arc<AlertStore>,
        pending: Arc<PendingSelections>,
        sources: Arc<PriceSources>,
    ) -> Self {
        Self {
            store,
            pending,
            sources,
        }
    }

    async fn execute(&self, chat: ChatId, command: Command) -> Result<Reply, AlertError> {
        match command {
            Command::Start => Ok(Reply::text(format!(
                "🚀 Welcome to Crypto Alert Bot!\n\n{}",
                help_text()
            ))),
            Command::Help => Ok(Reply::text(help_text())),
            Command::List => self.list(chat).await,
            Command::Compare { symbol } => self.compare(symbol).await,
            Command::Remove { target } => self.remove(chat, target),
            Command::Clear => Ok(self.clear(chat)),
            Command::Create {
                symbol,
                target,
                exchange: Some(exchange),
            } => self.register(chat, symbol, target, exchange).await,
            Command::Create {
                symbol,
                target,
                exchange: None,
            } => Ok(self.prompt_exchange(chat, symbol, target)),
            Command::SelectExchange { exchange } => {
                let pending = self.pending.take(chat).ok_or(AlertError::SelectionExpired)?;
                self.register(chat, pending.symbol, pending.target, exchange)
                    .await
            }
        }
    }

    /// Validate against the exchange and store a new alert.
    async fn register(
        &self,
        chat: ChatId,
        symbol: Symbol,
        target: Price,
        exchange: Exchange,
    ) -> Result<Reply, AlertError> {
        let current = self
            .sources
            .fetch(&symbol, exchange)
            .await
            .map_err(|e| e.into_alert_error(&symbol))?;

        let alert = Alert::try_new(symbol, exchange, target, current)?;
        let sign = alert.direction().map_or('=', Direction::sign);
        let text = format!(
            "✅ Alert: {}/{} {} ${}",
            alert.symbol,
            exchange.label().to_uppercase(),
            sign,
            format_price(target)
        );
        let symbol = alert.symbol.clone();
        let id = self.store.create(chat, alert);
        info!(%chat, alert_id = %id, %symbol, %exchange, %target, %current, "Alert created");
        Ok(Reply::text(text))
    }

    fn prompt_exchange(&self, chat: ChatId, symbol: Symbol, target: Price) -> Reply {
        let text = format!(
            "📊 Setting alert for {symbol} at ${}\n\nSelect exchange:",
            format_price_grouped(target)
        );
        debug!(%chat, %symbol, %target, "Awaiting exchange selection");
        self.pending.put(chat, symbol, target);
        Reply::with_choices(text, Exchange::ALL.into_iter().map(Choice::exchange).collect())
    }

    async fn list(&self, chat: ChatId) -> Result<Reply, AlertError> {
        let alerts = self.store.get_all(chat);
        if alerts.is_empty() {
            return Ok(Reply::text("📭 No active alerts"));
        }

        let prices = join_all(
            alerts
                .iter()
                .map(|(_, alert)| self.sources.fetch(&alert.symbol, alert.exchange)),
        )
        .await;

        let mut text = String::from("📊 Active Alerts:\n\n");
        for (position, ((_, alert), price)) in alerts.iter().zip(prices).enumerate() {
            let current = price.map_or_else(|_| "N/A".to_string(), |p| format!("${}", format_price(p)));
            let direction = alert.direction().map_or("= at", Direction::label);
            text.push_str(&format!(
                "{}. {} ({}): {} ${} (Current: {})\n",
                position + 1,
                alert.symbol,
                alert.exchange.label().to_uppercase(),
                direction,
                format_price(alert.target),
                current
            ));
        }
        Ok(Reply::text(text.trim_end()))
    }

    async fn compare(&self, symbol: Symbol) -> Result<Reply, AlertError> {
        let results = self.sources.fetch_all(&symbol).await;
        let comparison = Comparison::from_results(symbol, results);

        if comparison.not_listed_anywhere() {
            return Ok(Reply::text(format!(
                "❌ {} not found on any exchange",
                comparison.symbol
            )));
        }
        let (Some((high_ex, high)), Some((low_ex, low)), Some(spread)) = (
            comparison.highest(),
            comparison.lowest(),
            comparison.spread(),
        ) else {
            return Ok(Reply::text(format!(
                "❌ Could not fetch {} from any exchange, try again shortly",
                comparison.symbol
            )));
        };

        let mut text = format!("📊 {} across exchanges:\n\n", comparison.symbol);
        for (exchange, price) in &comparison.quotes {
            text.push_str(&format!(
                "{} {}: ${}\n",
                exchange.marker(),
                exchange.label().to_uppercase(),
                format_price(*price)
            ));
        }
        for (exchange, _) in &comparison.missing {
            text.push_str(&format!(
                "{} {}: N/A\n",
                exchange.marker(),
                exchange.label().to_uppercase()
            ));
        }
        text.push_str(&format!(
            "\n📈 Highest: {} ${}\n📉 Lowest: {} ${}\n↔️ Spread: ${}",
            high_ex.label().to_uppercase(),
            format_price(high),
            low_ex.label().to_uppercase(),
            format_price(low),
            format_price(spread)
        ));
        if let Some(percent) = comparison.spread_percent() {
            text.push_str(&format!(" ({}%)", format_price(percent)));
        }
        Ok(Reply::text(text))
    }

    fn remove(&self, chat: ChatId, target: RemoveTarget) -> Result<Reply, AlertError> {
        if self.store.get_all(chat).is_empty() {
            return Err(AlertError::NoAlerts);
        }
        match target {
            RemoveTarget::Position(position) => {
                let (id, alert) = self
                    .store
                    .remove_at(chat, position)
                    .ok_or_else(|| AlertError::AlertNotFound(format!("#{position}")))?;
                info!(%chat, alert_id = %id, position, "Alert removed");
                Ok(Reply::text(format!(
                    "✅ Alert #{position} removed for {}",
                    alert.symbol
                )))
            }
            RemoveTarget::Symbol(symbol) => {
                let removed = self.store.remove_by_symbol(chat, &symbol);
                if removed == 0 {
                    return Err(AlertError::AlertNotFound(symbol.to_string()));
                }
                info!(%chat, %symbol, removed, "Alerts removed");
                Ok(Reply::text(format!(
                    "✅ Removed {removed} alert(s) for {symbol}"
                )))
            }
        }
    }

    fn clear(&self, chat: ChatId) -> Reply {
        let removed = self.store.clear(chat);
        if removed == 0 {
            return Reply::text("📭 No alerts to clear");
        }
        info!(%chat, removed, "Alerts cleared");
        Reply::text("✅ All alerts cleared")
    }
}

#[async_trait]
impl CommandHandler for AlertService {
    async fn handle(&self, chat: ChatId, command: Command) -> Reply {
        match self.execute(chat, command).await {
            Ok(reply) => reply,
            Err(e) => {
                debug!(%chat, error = %e, "Command rejected");
                Reply::error(e)
            }
        }
    }
}
