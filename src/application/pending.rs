//! Per-chat staging for alerts waiting on an exchange choice.
//!
//! At most one entry per chat. A newer request overwrites the older one and
//! nothing here is persisted.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::{ChatId, PendingSelection, Price, Symbol};

/// Short-lived buffer of [`PendingSelection`]s.
#[derive(Default)]
pub struct PendingSelections {
    entries: Mutex<HashMap<ChatId, PendingSelection>>,
}

impl PendingSelections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an alert for `chat`, replacing any earlier one.
    pub fn put(&self, chat: ChatId, symbol: Symbol, target: Price) {
        self.entries
            .lock()
            .insert(chat, PendingSelection { symbol, target });
    }

    /// Remove and return the staged alert for `chat`.
    pub fn take(&self, chat: ChatId) -> Option<PendingSelection> {
        self.entries.lock().remove(&chat)
    }

    /// Number of chats with a staged alert.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
