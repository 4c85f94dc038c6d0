use std::path::Path;
use std::time::Duration;

use pricealert::domain::Exchange;
use pricealert::error::{ConfigError, Error};
use pricealert::infrastructure::config::Config;

#[test]
fn example_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml.example");
    let config = Config::load(path).unwrap();
    assert_eq!(config.polling.poller().interval, Duration::from_secs(10));
    assert_eq!(config.polling.poller().max_concurrent_fetches, 8);
    assert_eq!(config.snapshot.path, Path::new("active_alerts.json"));
    assert_eq!(config.http.timeout(), Duration::from_millis(5000));
    for exchange in Exchange::ALL {
        assert!(config.exchanges.base_url(exchange).starts_with("https://"));
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.logging.level, "info");

    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn zero_concurrency_is_rejected() {
    let err = Config::parse_toml("[polling]\nmax_concurrent_fetches = 0").unwrap_err();
    assert!(err.to_string().contains("max_concurrent_fetches"));
}

#[test]
fn non_http_exchange_url_is_rejected() {
    let err = Config::parse_toml("[exchanges]\nmexc_url = \"ftp://example.com\"").unwrap_err();
    assert!(err.to_string().contains("mexc_url"));
}
