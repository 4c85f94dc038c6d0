//! Telegram notification delivery.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId as TgChatId, InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::{debug, warn};
use url::Url;

use crate::port::{DeliveryError, Link, Notification, NotificationSink};

/// Sends notifications as bot messages, links as URL buttons.
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// One button per row. Links that are not valid URLs are dropped.
pub(crate) fn link_keyboard(links: &[Link]) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = links
        .iter()
        .filter_map(|link| match Url::parse(&link.url) {
            Ok(url) => Some(vec![InlineKeyboardButton::url(link.label.clone(), url)]),
            Err(e) => {
                warn!(url = %link.url, error = %e, "Dropping invalid notification link");
                None
            }
        })
        .collect();
    (!rows.is_empty()).then(|| InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let chat = TgChatId(notification.chat.get());
        let mut request = self.bot.send_message(chat, &notification.text);
        if let Some(keyboard) = link_keyboard(&notification.links) {
            request = request.reply_markup(keyboard);
        }

        request.await.map_err(|e| DeliveryError {
            chat: notification.chat,
            reason: e.to_string(),
        })?;
        debug!(chat = %notification.chat, "Notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_has_one_row_per_valid_link() {
        let links = vec![
            Link::new("🔗 BINANCE", "https://www.binance.com/en/futures/BTCUSDT"),
            Link::new("broken", "not a url"),
            Link::new("📱 BINANCE mobile", "https://app.binance.com/en/futures/BTCUSDT"),
        ];
        let keyboard = link_keyboard(&links).unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "🔗 BINANCE");
    }

    #[test]
    fn no_links_means_no_keyboard() {
        assert!(link_keyboard(&[]).is_none());
    }
}
