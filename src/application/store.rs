//! In-memory alert store with write-through snapshots.
//!
//! The store is the authority for the running process. Every structural
//! mutation (create, remove, clear) writes the full snapshot before
//! returning; a failed write is logged and the in-memory change stands.
//! Id allocation and map updates happen under one lock, and snapshot writes
//! happen under that same lock so they are never interleaved.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::domain::{Alert, AlertId, ChatId, Price, Symbol};
use crate::error::PersistenceError;
use crate::port::{Snapshot, SnapshotStore};

/// First id handed out by an empty store.
const FIRST_ID: AlertId = AlertId::new(1);

/// Result of feeding a fresh price to a stored alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// The alert after `last_observed` was advanced.
    pub alert: Alert,
    /// Whether the price crossed the target.
    pub triggered: bool,
}

struct Book {
    chats: BTreeMap<ChatId, BTreeMap<AlertId, Alert>>,
    next_id: AlertId,
}

impl Book {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            chats: self.chats.clone(),
        }
    }

    fn prune(&mut self, chat: ChatId) {
        if self.chats.get(&chat).is_some_and(BTreeMap::is_empty) {
            self.chats.remove(&chat);
        }
    }
}

/// Authoritative collection of active alerts keyed by (chat, id).
pub struct AlertStore {
    book: Mutex<Book>,
    persistence: Arc<dyn SnapshotStore>,
}

impl AlertStore {
    /// Load the store from its snapshot.
    ///
    /// The id counter resumes at the highest stored id plus one.
    ///
    /// # Errors
    ///
    /// Returns the persistence error if the snapshot cannot be read.
    pub fn open(persistence: Arc<dyn SnapshotStore>) -> Result<Self, PersistenceError> {
        let snapshot = persistence.load()?;
        let next_id = snapshot.max_id().map_or(FIRST_ID, AlertId::next);
        info!(
            chats = snapshot.chats.len(),
            alerts = snapshot.alert_count(),
            next_id = %next_id,
            "Loaded alert snapshot"
        );
        Ok(Self {
            book: Mutex::new(Book {
                chats: snapshot.chats,
                next_id,
            }),
            persistence,
        })
    }

    /// Store a new alert and return its id.
    pub fn create(&self, chat: ChatId, alert: Alert) -> AlertId {
        let mut book = self.book.lock();
        let id = book.next_id;
        book.next_id = id.next();
        book.chats.entry(chat).or_default().insert(id, alert);
        self.persist(&book);
        id
    }

    /// Alerts for a chat in insertion order.
    #[must_use]
    pub fn get_all(&self, chat: ChatId) -> Vec<(AlertId, Alert)> {
        self.book
            .lock()
            .chats
            .get(&chat)
            .map(|alerts| alerts.iter().map(|(id, a)| (*id, a.clone())).collect())
            .unwrap_or_default()
    }

    /// Every alert across all chats.
    #[must_use]
    pub fn all(&self) -> Vec<(ChatId, AlertId, Alert)> {
        self.book
            .lock()
            .chats
            .iter()
            .flat_map(|(chat, alerts)| {
                alerts
                    .iter()
                    .map(move |(id, alert)| (*chat, *id, alert.clone()))
            })
            .collect()
    }

    /// Remove one alert by id.
    pub fn remove(&self, chat: ChatId, id: AlertId) -> Option<Alert> {
        let mut book = self.book.lock();
        let removed = book.chats.get_mut(&chat)?.remove(&id)?;
        book.prune(chat);
        self.persist(&book);
        Some(removed)
    }

    /// Remove the alert at a 1-based position in insertion order.
    pub fn remove_at(&self, chat: ChatId, position: usize) -> Option<(AlertId, Alert)> {
        let mut book = self.book.lock();
        let alerts = book.chats.get_mut(&chat)?;
        let id = *alerts.keys().nth(position.checked_sub(1)?)?;
        let alert = alerts.remove(&id)?;
        book.prune(chat);
        self.persist(&book);
        Some((id, alert))
    }

    /// Remove every alert on `symbol` for a chat. Returns how many went.
    pub fn remove_by_symbol(&self, chat: ChatId, symbol: &Symbol) -> usize {
        let mut book = self.book.lock();
        let Some(alerts) = book.chats.get_mut(&chat) else {
            return 0;
        };
        let before = alerts.len();
        alerts.retain(|_, alert| alert.symbol != *symbol);
        let removed = before - alerts.len();
        if removed > 0 {
            book.prune(chat);
            self.persist(&book);
        }
        removed
    }

    /// Remove every alert for a chat. Returns how many went.
    pub fn clear(&self, chat: ChatId) -> usize {
        let mut book = self.book.lock();
        let removed = book.chats.remove(&chat).map_or(0, |alerts| alerts.len());
        if removed > 0 {
            self.persist(&book);
        }
        removed
    }

    /// Overwrite `last_observed` without evaluating a crossing.
    ///
    /// Kept in memory only; the next structural mutation or flush persists it.
    pub fn update_last_observed(&self, chat: ChatId, id: AlertId, price: Price) -> bool {
        let mut book = self.book.lock();
        match book.chats.get_mut(&chat).and_then(|alerts| alerts.get_mut(&id)) {
            Some(alert) => {
                alert.last_observed = price;
                true
            }
            None => false,
        }
    }

    /// Evaluate a fresh price against a stored alert and advance it.
    ///
    /// Returns `None` if the alert no longer exists.
    pub fn observe(&self, chat: ChatId, id: AlertId, price: Price) -> Option<Observation> {
        let mut book = self.book.lock();
        let alert = book.chats.get_mut(&chat)?.get_mut(&id)?;
        let triggered = alert.observe(price);
        Some(Observation {
            alert: alert.clone(),
            triggered,
        })
    }

    /// Write the current state to the snapshot store.
    ///
    /// # Errors
    ///
    /// Returns the persistence error so shutdown can report it.
    pub fn flush(&self) -> Result<(), PersistenceError> {
        let book = self.book.lock();
        self.persistence.save(&book.snapshot())
    }

    /// The id the next `create` will assign.
    #[must_use]
    pub fn next_id(&self) -> AlertId {
        self.book.lock().next_id
    }

    /// Total active alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.book.lock().chats.values().map(BTreeMap::len).sum()
    }

    /// True if there are no active alerts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, book: &Book) {
        match self.persistence.save(&book.snapshot()) {
            Ok(()) => debug!("Saved alert snapshot"),
            Err(e) => error!(error = %e, "Failed to save alert snapshot"),
        }
    }
}
