//! Snapshot persistence port.
//!
//! The on-disk shape is a JSON object keyed by chat id (decimal string),
//! each value an object keyed by alert id (decimal string) holding the alert
//! fields:
//!
//! ```json
//! {
//!   "12345": {
//!     "7": {
//!       "symbol": "BTCUSDT",
//!       "exchange": "binance",
//!       "target": "90000",
//!       "initial": "95000",
//!       "last_price": "93000"
//!     }
//!   }
//! }
//! ```
//!
//! Numeric price values are accepted on read, and a missing or null
//! `last_price` falls back to `initial`. Entries that still fail to decode
//! are dropped with a warning; only a document that is not a JSON object of
//! objects is rejected.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{Alert, AlertId, ChatId, Exchange, Price, Symbol};
use crate::error::PersistenceError;

type RawSnapshot = BTreeMap<String, BTreeMap<String, Alert>>;

/// One alert as read back from disk.
#[derive(Debug, Deserialize)]
struct StoredAlert {
    symbol: Symbol,
    exchange: Exchange,
    target: Price,
    initial: Price,
    #[serde(default, rename = "last_price", alias = "last_observed")]
    last_observed: Option<Price>,
}

impl From<StoredAlert> for Alert {
    fn from(stored: StoredAlert) -> Self {
        Self {
            symbol: stored.symbol,
            exchange: stored.exchange,
            target: stored.target,
            initial: stored.initial,
            last_observed: stored.last_observed.unwrap_or(stored.initial),
        }
    }
}

/// Every active alert, grouped by chat and ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub chats: BTreeMap<ChatId, BTreeMap<AlertId, Alert>>,
}

impl Snapshot {
    /// Decode the JSON representation.
    ///
    /// Chat or alert keys that are not integers, and alerts whose fields do
    /// not decode, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Malformed`] if the text is not a JSON
    /// object of objects.
    pub fn decode(text: &str) -> Result<Self, PersistenceError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: BTreeMap<String, BTreeMap<String, Value>> =
            serde_json::from_str(text).map_err(PersistenceError::Malformed)?;

        let mut chats = BTreeMap::new();
        for (chat_key, alerts) in raw {
            let Ok(chat) = chat_key.parse::<ChatId>() else {
                warn!(chat = %chat_key, "Skipping snapshot entry with non-numeric chat id");
                continue;
            };
            let mut parsed = BTreeMap::new();
            for (id_key, value) in alerts {
                let Ok(id) = id_key.parse::<AlertId>() else {
                    warn!(%chat, alert_id = %id_key, "Skipping alert with non-numeric id");
                    continue;
                };
                match serde_json::from_value::<StoredAlert>(value) {
                    Ok(stored) => {
                        parsed.insert(id, Alert::from(stored));
                    }
                    Err(e) => {
                        warn!(%chat, alert_id = %id, error = %e, "Skipping malformed alert");
                    }
                }
            }
            chats.insert(chat, parsed);
        }
        Ok(Self { chats })
    }

    /// Encode as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<String, PersistenceError> {
        let raw: RawSnapshot = self
            .chats
            .iter()
            .map(|(chat, alerts)| {
                let alerts = alerts
                    .iter()
                    .map(|(id, alert)| (id.to_string(), alert.clone()))
                    .collect();
                (chat.to_string(), alerts)
            })
            .collect();
        serde_json::to_string_pretty(&raw).map_err(PersistenceError::Encode)
    }

    /// Highest stored alert id, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<AlertId> {
        self.chats
            .values()
            .filter_map(|alerts| alerts.keys().next_back().copied())
            .max()
    }

    /// Total number of alerts across all chats.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.chats.values().map(BTreeMap::len).sum()
    }
}

/// Durable key-value snapshot of the alert store.
///
/// Calls are synchronous and block the caller; the store serializes them.
pub trait SnapshotStore: Send + Sync {
    /// Read the last written snapshot. A store that was never written yields
    /// an empty snapshot.
    fn load(&self) -> Result<Snapshot, PersistenceError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exchange, Symbol};
    use rust_decimal_macros::dec;

    fn alert() -> Alert {
        Alert::try_new(
            Symbol::parse("BTC").unwrap(),
            Exchange::Binance,
            dec!(90000),
            dec!(95000),
        )
        .unwrap()
    }

    #[test]
    fn decodes_legacy_numeric_prices() {
        let text = r#"{
            "42": {
                "3": {"symbol": "ETHUSDT", "target": 4000.0, "initial": 3500.5,
                      "last_price": 3600, "exchange": "bybit"}
            }
        }"#;
        let snapshot = Snapshot::decode(text).unwrap();
        let alert = &snapshot.chats[&ChatId::new(42)][&AlertId::new(3)];
        assert_eq!(alert.exchange, Exchange::Bybit);
        assert_eq!(alert.target, dec!(4000));
        assert_eq!(alert.initial, dec!(3500.5));
        assert_eq!(alert.last_observed, dec!(3600));
    }

    #[test]
    fn skips_non_numeric_ids() {
        let text = r#"{
            "42": {
                "abc": {"symbol": "ETHUSDT", "target": "4000", "initial": "3500",
                        "last_price": "3600", "exchange": "bybit"},
                "5": {"symbol": "ETHUSDT", "target": "4000", "initial": "3500",
                      "last_price": "3600", "exchange": "bybit"}
            }
        }"#;
        let snapshot = Snapshot::decode(text).unwrap();
        assert_eq!(snapshot.alert_count(), 1);
        assert_eq!(snapshot.max_id(), Some(AlertId::new(5)));
    }

    #[test]
    fn skips_alerts_that_do_not_decode() {
        let text = r#"{
            "42": {
                "1": {"symbol": "BTCUSDT", "target": "90000", "initial": "95000",
                      "last_price": "93000", "exchange": "binance"},
                "2": {"symbol": "BTCUSDT", "target": "90000", "initial": "95000",
                      "last_price": "93000", "exchange": "kraken"},
                "3": {"symbol": "BTC/USDT", "target": "90000", "initial": "95000",
                      "last_price": "93000", "exchange": "bybit"},
                "4": {"symbol": "ETHUSDT", "target": null, "initial": "3500",
                      "exchange": "bybit"}
            }
        }"#;
        let snapshot = Snapshot::decode(text).unwrap();
        let alerts = &snapshot.chats[&ChatId::new(42)];
        assert_eq!(alerts.len(), 1);
        assert!(alerts.contains_key(&AlertId::new(1)));
    }

    #[test]
    fn missing_or_null_last_price_falls_back_to_initial() {
        let text = r#"{
            "7": {
                "1": {"symbol": "ETHUSDT", "target": "4000", "initial": "3500",
                      "exchange": "bybit"},
                "2": {"symbol": "ETHUSDT", "target": "4000", "initial": "3500",
                      "last_price": null, "exchange": "mexc"}
            }
        }"#;
        let snapshot = Snapshot::decode(text).unwrap();
        let alerts = &snapshot.chats[&ChatId::new(7)];
        assert_eq!(alerts[&AlertId::new(1)].last_observed, dec!(3500));
        assert_eq!(alerts[&AlertId::new(2)].last_observed, dec!(3500));
    }

    #[test]
    fn stored_symbols_are_normalized() {
        let text = r#"{
            "1": {
                "1": {"symbol": "btc", "target": "90000", "initial": "95000",
                      "last_price": "95000", "exchange": "mexc"}
            }
        }"#;
        let snapshot = Snapshot::decode(text).unwrap();
        let alert = &snapshot.chats[&ChatId::new(1)][&AlertId::new(1)];
        assert_eq!(alert.symbol.as_str(), "BTCUSDT");
        assert_eq!(alert.symbol.base(), "BTC");
    }

    #[test]
    fn empty_text_is_empty_snapshot() {
        assert_eq!(Snapshot::decode("  ").unwrap(), Snapshot::default());
        assert_eq!(Snapshot::default().max_id(), None);
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(matches!(
            Snapshot::decode("[1, 2, 3]"),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn encode_then_decode_preserves_alerts() {
        let mut snapshot = Snapshot::default();
        snapshot
            .chats
            .entry(ChatId::new(-100))
            .or_default()
            .insert(AlertId::new(12), alert());
        let text = snapshot.encode().unwrap();
        assert!(text.contains("\"-100\""));
        assert!(text.contains("\"12\""));
        assert_eq!(Snapshot::decode(&text).unwrap(), snapshot);
    }
}
