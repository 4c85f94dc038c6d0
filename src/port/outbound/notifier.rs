//! Notification sink port.
//!
//! Delivery is awaited and its outcome reported back, because the poller
//! only retires a triggered alert once the user has actually been told.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ChatId;

/// A labeled link attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// A message for one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient chat.
    pub chat: ChatId,
    /// Plain message body.
    pub text: String,
    /// Links rendered as buttons where the transport supports them.
    pub links: Vec<Link>,
}

/// The transport refused or failed to deliver a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to deliver notification to chat {chat}: {reason}")]
pub struct DeliveryError {
    pub chat: ChatId,
    pub reason: String,
}

/// Outbound channel to the chat transport.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification, reporting failure to the caller.
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// A sink that logs notifications via tracing and always succeeds.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        tracing::info!(
            chat = %notification.chat,
            links = notification.links.len(),
            text = %notification.text,
            "Notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_sink_always_delivers() {
        let notification = Notification {
            chat: ChatId::new(1),
            text: "hello".into(),
            links: vec![Link::new("Open", "https://example.com")],
        };
        assert!(LogSink.deliver(&notification).await.is_ok());
    }
}
