mod support;

use std::fs;
use std::sync::Arc;

use pricealert::adapter::outbound::snapshot::JsonFileSnapshotStore;
use pricealert::application::AlertStore;
use pricealert::domain::{AlertId, ChatId, Exchange};
use pricealert::port::{Command, CommandHandler, SnapshotStore};
use pricealert::testkit::domain::{alert, symbol};
use pricealert::testkit::price::Quote;
use rust_decimal_macros::dec;
use tempfile::tempdir;

use support::World;

#[tokio::test]
async fn alerts_survive_restart_and_ids_continue() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("active_alerts.json");
    let chat = ChatId::new(1001);

    {
        let world = World::with_persistence(Arc::new(JsonFileSnapshotStore::new(&path)));
        world
            .source(Exchange::Bybit)
            .set("BTC", [Quote::Price(dec!(95000))]);
        for target in [dec!(90000), dec!(99000), dec!(80000)] {
            world
                .service
                .handle(
                    chat,
                    Command::Create {
                        symbol: symbol("BTC"),
                        target,
                        exchange: Some(Exchange::Bybit),
                    },
                )
                .await;
        }
        // Remove id 3 so the counter has to come from the highest stored id.
        world.store.remove(chat, AlertId::new(3));
    }

    let store = AlertStore::open(Arc::new(JsonFileSnapshotStore::new(&path))).unwrap();
    let alerts = store.get_all(chat);
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].0, AlertId::new(1));
    assert_eq!(alerts[1].1.target, dec!(99000));
    assert_eq!(alerts[1].1.last_observed, dec!(95000));
    assert_eq!(store.next_id(), AlertId::new(3));
}

#[test]
fn legacy_numeric_snapshot_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("active_alerts.json");
    fs::write(
        &path,
        r#"{
          "555": {
            "4": {"symbol": "ETHUSDT", "exchange": "mexc", "target": 4000.0,
                  "initial": 3500.5, "last_price": 3600},
            "legacy": {"symbol": "BTCUSDT", "exchange": "binance", "target": 1,
                       "initial": 2, "last_price": 2}
          },
          "not-a-chat": {}
        }"#,
    )
    .unwrap();

    let store = AlertStore::open(Arc::new(JsonFileSnapshotStore::new(&path))).unwrap();
    assert_eq!(store.len(), 1);
    let (id, alert) = &store.get_all(ChatId::new(555))[0];
    assert_eq!(*id, AlertId::new(4));
    assert_eq!(alert.exchange, Exchange::Mexc);
    assert_eq!(alert.initial, dec!(3500.5));
    assert_eq!(store.next_id(), AlertId::new(5));
}

#[test]
fn snapshot_writes_decimal_strings_under_chat_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("active_alerts.json");
    let persistence = Arc::new(JsonFileSnapshotStore::new(&path));
    let store = AlertStore::open(persistence.clone()).unwrap();
    store.create(
        ChatId::new(-100123),
        alert("BTC", Exchange::Binance, dec!(90000.5), dec!(95000)),
    );

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let entry = &json["-100123"]["1"];
    assert_eq!(entry["symbol"], "BTCUSDT");
    assert_eq!(entry["exchange"], "binance");
    assert_eq!(entry["target"], "90000.5");
    assert_eq!(entry["last_price"], "95000");

    let reloaded = persistence.load().unwrap();
    assert_eq!(reloaded.alert_count(), 1);
}

#[test]
fn malformed_entries_are_dropped_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("active_alerts.json");
    fs::write(
        &path,
        r#"{
          "9": {
            "1": {"symbol": "BTCUSDT", "exchange": "binance", "target": "90000",
                  "initial": "95000", "last_price": "94000"},
            "2": {"symbol": "BTCUSDT", "exchange": "kraken", "target": "90000",
                  "initial": "95000", "last_price": "94000"},
            "3": {"symbol": "SOLUSDT", "exchange": "bitget", "target": "250",
                  "initial": "200"},
            "4": {"symbol": "BTC-PERP", "exchange": "bybit", "target": "90000",
                  "initial": "95000", "last_price": "94000"}
          }
        }"#,
    )
    .unwrap();

    let store = AlertStore::open(Arc::new(JsonFileSnapshotStore::new(&path))).unwrap();
    let alerts = store.get_all(ChatId::new(9));
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].0, AlertId::new(1));
    assert_eq!(alerts[1].0, AlertId::new(3));
    assert_eq!(alerts[1].1.last_observed, dec!(200));
    assert_eq!(store.next_id(), AlertId::new(4));
}

#[tokio::test]
async fn short_stored_symbol_is_normalized_and_still_triggers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("active_alerts.json");
    fs::write(
        &path,
        r#"{"1": {"1": {"symbol": "BTC", "exchange": "mexc", "target": "90000",
                        "initial": "95000", "last_price": "95000"}}}"#,
    )
    .unwrap();

    let world = World::with_persistence(Arc::new(JsonFileSnapshotStore::new(&path)));
    let (_, loaded) = &world.store.get_all(ChatId::new(1))[0];
    assert_eq!(loaded.symbol.as_str(), "BTCUSDT");

    world
        .source(Exchange::Mexc)
        .set("BTC", [Quote::Price(dec!(89000))]);
    let report = world.poller.tick().await;
    assert_eq!(report.delivered, 1);

    let sent = world.sink.delivered();
    assert!(sent[0].links.iter().any(|link| link.url.contains("BTC_USDT")));
}
