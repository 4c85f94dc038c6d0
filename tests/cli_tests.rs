use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn pricealert() -> Command {
    let mut cmd = Command::cargo_bin("pricealert").expect("binary built");
    cmd.env_remove("TELEGRAM_BOT_TOKEN")
        .env_remove("TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    pricealert()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn check_config_reports_invalid_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[polling]\ninterval_secs = 0\n").unwrap();

    pricealert()
        .current_dir(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_secs"));
}

#[test]
fn check_config_accepts_defaults_and_warns_about_token() {
    let dir = tempdir().unwrap();
    pricealert()
        .current_dir(dir.path())
        .args(["check", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn run_without_token_fails_fast() {
    let dir = tempdir().unwrap();
    pricealert()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn price_rejects_unknown_exchange() {
    let dir = tempdir().unwrap();
    pricealert()
        .current_dir(dir.path())
        .args(["price", "btc", "--exchange", "kraken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("kraken"));
}
