//! Behavior-driven tests for strategy backtests and performance metrics.

use tickerlens_analytics::backtest;
use tickerlens_analytics::metrics::{max_drawdown, total_return_pct};
use tickerlens_analytics::{
    AnalyticsEngine, AnalyticsError, DailySentiment, EngineConfig, StrategyKind,
};
use tickerlens_core::{DataSource, PriceRequest, YahooAdapter};
use tickerlens_tests::{assert_close, daily_series, date, range, symbol};

// ============================================================================
// Sentiment strategy
// ============================================================================

#[test]
fn when_yesterday_was_positive_system_holds_the_asset_today() {
    // Given: positive news on day one, negative on day two
    let prices = daily_series("NVDA", "2024-01-01", &[100.0, 101.0, 98.98]);
    let sentiment: DailySentiment = [(date("2024-01-01"), 0.2), (date("2024-01-02"), -0.3)]
        .into_iter()
        .collect();

    // When
    let result = backtest::run(
        &prices,
        &sentiment,
        prices.span(),
        10_000.0,
        StrategyKind::Sentiment,
        &EngineConfig::default(),
    )
    .expect("backtest");

    // Then: only the day after the positive reading earns its return
    assert_eq!(result.exposure, vec![0.0, 1.0, 0.0]);
    assert_close(result.strategy_cum[2], 1.01);
    assert_close(result.final_value, 10_100.0);
    assert_close(result.pnl, 100.0);
    assert_close(result.benchmark_cum[2], 0.9898);
}

#[test]
fn when_same_day_news_is_positive_system_does_not_trade_on_it() {
    // Given: the only positive reading falls on the final day
    let prices = daily_series("NVDA", "2024-01-01", &[100.0, 120.0, 150.0]);
    let sentiment: DailySentiment = [(date("2024-01-03"), 0.9)].into_iter().collect();

    // When
    let result = backtest::run(
        &prices,
        &sentiment,
        prices.span(),
        1_000.0,
        StrategyKind::Sentiment,
        &EngineConfig::default(),
    )
    .expect("backtest");

    // Then: no look-ahead, the strategy never enters
    assert!(result.exposure.iter().all(|weight| *weight == 0.0));
    assert_close(result.final_value, 1_000.0);
}

#[test]
fn when_range_is_narrower_than_prices_system_backtests_only_the_window() {
    // Given
    let prices = daily_series("AAPL", "2024-01-01", &[10.0, 11.0, 12.0, 13.0, 14.0]);

    // When
    let result = backtest::run(
        &prices,
        &DailySentiment::new(),
        range("2024-01-02", "2024-01-04"),
        100.0,
        StrategyKind::BuyAndHold,
        &EngineConfig::default(),
    )
    .expect("backtest");

    // Then
    assert_eq!(result.dates.len(), 3);
    assert_close(result.final_value, 100.0 * 13.0 / 11.0);
}

#[test]
fn when_range_holds_a_single_close_system_reports_insufficient_data() {
    let prices = daily_series("AAPL", "2024-01-01", &[10.0, 11.0]);
    let err = backtest::run(
        &prices,
        &DailySentiment::new(),
        range("2024-01-02", "2024-01-05"),
        100.0,
        StrategyKind::Sentiment,
        &EngineConfig::default(),
    )
    .expect_err("must fail");
    assert!(matches!(
        err,
        AnalyticsError::InsufficientData {
            required: 2,
            actual: 1
        }
    ));
}

#[test]
fn when_capital_is_zero_system_rejects_the_run() {
    let prices = daily_series("AAPL", "2024-01-01", &[10.0, 11.0]);
    let err = backtest::run(
        &prices,
        &DailySentiment::new(),
        prices.span(),
        0.0,
        StrategyKind::BuyAndHold,
        &EngineConfig::default(),
    )
    .expect_err("must fail");
    assert!(matches!(err, AnalyticsError::Validation(_)));
}

// ============================================================================
// Benchmarks
// ============================================================================

#[test]
fn when_buy_and_hold_runs_on_provider_data_system_matches_the_price_ratio() {
    // Given
    let engine = AnalyticsEngine::new(Box::new(YahooAdapter::default()), EngineConfig::default());
    let window = range("2024-01-01", "2024-03-31");
    let prices = YahooAdapter::default()
        .prices(&PriceRequest::new(symbol("MSFT"), window))
        .expect("prices");

    // When
    let run = engine
        .backtest_symbol(&symbol("MSFT"), window, 10_000.0, StrategyKind::BuyAndHold)
        .expect("backtest");

    // Then
    let expected = 10_000.0 * prices.last().close / prices.first().close;
    assert!((run.result.final_value - expected).abs() < 1e-6);
    assert_eq!(run.result.strategy_cum, run.result.benchmark_cum);
    assert!(run.news_failure.is_none(), "buy-and-hold never reads news");
}

#[test]
fn when_prices_are_flat_system_dca_preserves_capital_and_ends_fully_invested() {
    // Given: a constant price across three calendar months
    let prices = daily_series("VTI", "2024-01-01", &[50.0; 91]);

    // When
    let result = backtest::run(
        &prices,
        &DailySentiment::new(),
        range("2024-01-01", "2024-03-31"),
        9_000.0,
        StrategyKind::DollarCostAveraging,
        &EngineConfig::default(),
    )
    .expect("backtest");

    // Then
    assert_close(result.final_value, 9_000.0);
    assert_eq!(result.exposure[0], 0.0);
    assert_close(result.exposure[1], 1.0 / 3.0);
    assert_close(result.exposure[90], 1.0);
}

// ============================================================================
// Metrics
// ============================================================================

#[test]
fn when_curve_dips_after_a_peak_system_measures_the_drawdown_from_that_peak() {
    assert_close(max_drawdown(&[100.0, 120.0, 90.0, 110.0]), -25.0);
    assert_eq!(max_drawdown(&[1.0, 1.1, 1.2]), 0.0);
}

#[test]
fn when_curve_ends_above_start_system_reports_total_return_in_percent() {
    assert_close(total_return_pct(&[1.0, 1.05, 1.1]), 10.0);
    assert_eq!(total_return_pct(&[]), 0.0);
}

#[test]
fn when_strategy_never_trades_system_reports_zero_metrics() {
    // Given
    let prices = daily_series("AAPL", "2024-01-01", &[100.0, 90.0, 80.0, 95.0]);

    // When
    let result = backtest::run(
        &prices,
        &DailySentiment::new(),
        prices.span(),
        1_000.0,
        StrategyKind::Sentiment,
        &EngineConfig::default(),
    )
    .expect("backtest");

    // Then
    assert_eq!(result.strategy_metrics.sharpe, 0.0);
    assert_eq!(result.strategy_metrics.max_drawdown, 0.0);
    assert_close(result.strategy_metrics.cagr, 0.0);
    assert_close(result.benchmark_metrics.max_drawdown, -20.0);
}
