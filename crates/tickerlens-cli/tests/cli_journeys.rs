//! Behavior-driven tests for CLI user journeys against the built binary.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn tickerlens(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tickerlens"))
        .args(args)
        .env("TICKERLENS_HOME", home)
        .env_remove("TICKERLENS_LOG")
        .output()
        .expect("binary runs")
}

fn envelope(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON envelope")
}

fn home() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

// =============================================================================
// Analysis
// =============================================================================

#[test]
fn user_can_analyze_a_stock_as_of_a_fixed_date() {
    // Given
    let home = home();

    // When
    let output = tickerlens(home.path(), &["analyze", "nvda", "--as-of", "2024-06-28"]);

    // Then
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body = envelope(&output);
    assert_eq!(body["meta"]["schema_version"], "v1.0.0");
    assert_eq!(body["meta"]["source_chain"][0], "yahoo");
    assert_eq!(body["data"]["sentiment_summary"], "Bullish (3/5)");
    assert_eq!(body["data"]["forecast"]["symbol"], "NVDA");
    assert_eq!(
        body["data"]["forecast"]["forecast"]
            .as_array()
            .map(Vec::len),
        Some(7)
    );
}

#[test]
fn user_gets_exit_code_three_when_history_is_too_short() {
    // When
    let home = home();
    let output = tickerlens(
        home.path(),
        &["analyze", "BTC-USD", "--days", "3", "--as-of", "2024-06-28"],
    );

    // Then
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty(), "no envelope is written on failure");
}

// =============================================================================
// Backtests
// =============================================================================

#[test]
fn user_can_backtest_buy_and_hold_over_a_quarter() {
    // When
    let home = home();
    let output = tickerlens(
        home.path(),
        &[
            "backtest",
            "AAPL",
            "--start",
            "2024-01-01",
            "--end",
            "2024-03-31",
            "--strategy",
            "buy-and-hold",
        ],
    );

    // Then
    assert!(output.status.success());
    let body = envelope(&output);
    assert_eq!(body["data"]["strategy"], "buy-and-hold");
    assert_eq!(body["data"]["initial_capital"], 10000.0);
    assert_eq!(body["data"]["strategy_cum"], body["data"]["benchmark_cum"]);
}

#[test]
fn user_gets_a_validation_exit_code_for_an_inverted_range() {
    let home = home();
    let output = tickerlens(
        home.path(),
        &["backtest", "AAPL", "--start", "2024-03-31", "--end", "2024-01-01"],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn user_gets_exit_code_three_for_a_weekend_only_backtest() {
    // When
    let home = home();
    let output = tickerlens(
        home.path(),
        &[
            "backtest",
            "AAPL",
            "--start",
            "2024-01-06",
            "--end",
            "2024-01-07",
            "--strategy",
            "buy-and-hold",
        ],
    );

    // Then
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn user_is_warned_when_backtest_news_hits_the_headline_limit() {
    // Given
    let home = home();
    let config = home.path().join("config.json");
    std::fs::write(&config, r#"{"backtest_headline_limit": 10}"#).expect("write config");

    // When
    let output = tickerlens(
        home.path(),
        &[
            "backtest",
            "TSLA",
            "--start",
            "2024-01-01",
            "--end",
            "2024-12-31",
            "--source",
            "polygon",
        ],
    );

    // Then
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body = envelope(&output);
    let warnings = body["meta"]["warnings"].as_array().expect("warnings");
    assert!(warnings
        .iter()
        .any(|warning| warning.as_str().is_some_and(|text| text.starts_with("headline limit reached"))));
}

// =============================================================================
// Session and portfolio
// =============================================================================

#[test]
fn user_watchlist_survives_between_invocations() {
    // Given: a logged-in user adds a crypto pair
    let home = home();
    assert!(tickerlens(home.path(), &["login", "avery"]).status.success());
    assert!(tickerlens(home.path(), &["watchlist", "add", "eth-usd"])
        .status
        .success());

    // When
    let output = tickerlens(home.path(), &["watchlist", "list"]);

    // Then
    let body = envelope(&output);
    let watchlist: Vec<&str> = body["data"]["watchlist"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(watchlist, vec!["NVDA", "AAPL", "ETH-USD"]);
    assert!(home.path().join("session.json").exists());
}

#[test]
fn user_is_told_when_portfolio_quotes_fall_back_to_yahoo() {
    // When
    let home = home();
    let output = tickerlens(home.path(), &["portfolio", "--source", "polygon"]);

    // Then
    assert!(output.status.success());
    let body = envelope(&output);
    assert_eq!(body["meta"]["source_chain"][1], "yahoo");
    assert_eq!(body["data"]["asset_count"], 2);
    assert!(body["meta"]["warnings"][0]
        .as_str()
        .is_some_and(|warning| warning.contains("using yahoo")));
}

#[test]
fn user_in_strict_mode_fails_on_warnings() {
    let home = home();
    let output = tickerlens(home.path(), &["--strict", "portfolio", "--source", "polygon"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn user_can_list_sources_as_ndjson() {
    // When
    let home = home();
    let output = tickerlens(home.path(), &["sources", "--format", "ndjson"]);

    // Then: every line is standalone JSON
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert!(lines.len() >= 3, "meta line plus one line per source");
    assert!(lines[0].get("meta").is_some());
}
