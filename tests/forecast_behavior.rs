//! Behavior-driven tests for trend forecasting and summary labels.

use tickerlens_analytics::forecast::{self, volatility};
use tickerlens_analytics::{
    classify, AnalyticsError, EngineConfig, SentimentLabel, TradeSignal,
};
use tickerlens_tests::{assert_close, daily_series, date};

// ============================================================================
// Trend projection
// ============================================================================

#[test]
fn when_prices_rise_linearly_system_extends_the_line_past_the_last_close() {
    // Given: ten closes climbing one unit per day
    let closes: Vec<f64> = (0..10).map(|step| 100.0 + f64::from(step)).collect();
    let series = daily_series("NVDA", "2024-01-01", &closes);

    // When: a seven day forecast is requested
    let result = forecast::forecast(&series, &EngineConfig::default()).expect("forecast");

    // Then: the projection continues the trend on the following calendar days
    assert_eq!(result.forecast.len(), 7, "default horizon is one week");
    assert_close(result.slope, 1.0);
    assert_close(result.intercept, 100.0);
    assert_close(result.forecast[0].price, 110.0);
    assert_close(result.forecast_price, 116.0);
    assert_eq!(result.forecast[0].date, date("2024-01-11"));
    assert_eq!(result.forecast[6].date, date("2024-01-17"));
    assert_close(result.current_price, 109.0);
    assert_close(result.pct_change, 7.0 / 109.0 * 100.0);
    assert_eq!(result.history_len, 10);
}

#[test]
fn when_prices_are_flat_system_forecasts_no_change() {
    // Given: a constant close
    let series = daily_series("AAPL", "2024-02-01", &[50.0; 12]);

    // When
    let result = forecast::forecast(&series, &EngineConfig::default()).expect("forecast");

    // Then: slope, move, and volatility all read zero
    assert_close(result.slope, 0.0);
    assert_close(result.pct_change, 0.0);
    assert_eq!(result.volatility, 0.0, "history shorter than the window");
    assert!(result.forecast.iter().all(|point| (point.price - 50.0).abs() < 1e-9));
}

#[test]
fn when_history_is_too_short_system_reports_insufficient_data() {
    // Given: five closes against a seven point minimum
    let series = daily_series("AAPL", "2024-02-01", &[1.0, 2.0, 3.0, 4.0, 5.0]);

    // When
    let err = forecast::forecast(&series, &EngineConfig::default()).expect_err("must fail");

    // Then
    assert!(
        matches!(err, AnalyticsError::InsufficientData { required: 7, actual: 5 }),
        "unexpected error: {err}"
    );
}

#[test]
fn when_custom_horizon_is_configured_system_projects_that_many_days() {
    // Given
    let closes: Vec<f64> = (0..8).map(|step| 20.0 + f64::from(step) * 0.5).collect();
    let series = daily_series("MSFT", "2024-03-01", &closes);
    let config = EngineConfig {
        horizon: 3,
        ..EngineConfig::default()
    };

    // When
    let result = forecast::forecast(&series, &config).expect("forecast");

    // Then
    assert_eq!(result.forecast.len(), 3);
    assert_eq!(result.forecast[2].date, date("2024-03-11"));
}

// ============================================================================
// Volatility
// ============================================================================

#[test]
fn when_a_full_window_oscillates_system_reports_coefficient_of_variation() {
    // Given: thirty closes alternating around a mean of 100
    let closes: Vec<f64> = (0..30)
        .map(|step| if step % 2 == 0 { 90.0 } else { 110.0 })
        .collect();

    // When
    let value = volatility(&closes, 30);

    // Then: population deviation of 10 over a mean of 100
    assert_close(value, 10.0);
}

// ============================================================================
// Summary labels
// ============================================================================

#[test]
fn when_forecast_jumps_and_news_is_upbeat_system_flags_a_strong_buy() {
    // When
    let summary = classify(6.42, 0.3);

    // Then
    assert_eq!(summary.sentiment, SentimentLabel::Bullish);
    assert_eq!(summary.signal, Some(TradeSignal::StrongBuy));
    assert_eq!(summary.signal.map(TradeSignal::as_str), Some("STRONG BUY SIGNAL"));
}

#[test]
fn when_forecast_falls_sharply_system_warns_to_sell() {
    // Given: a linearly falling series whose projection drops seven percent
    let closes: Vec<f64> = (0..10).map(|step| 109.0 - f64::from(step)).collect();
    let series = daily_series("INTC", "2024-01-01", &closes);
    let result = forecast::forecast(&series, &EngineConfig::default()).expect("forecast");

    // When
    let summary = classify(result.pct_change, -0.2);

    // Then
    assert_close(result.pct_change, -7.0);
    assert_eq!(summary.signal, Some(TradeSignal::SellWarning));
    assert_eq!(summary.sentiment, SentimentLabel::Bearish);
}

#[test]
fn when_moves_sit_on_the_thresholds_system_stays_neutral() {
    // Then: both cut-offs are exclusive
    let summary = classify(5.0, 0.1);
    assert_eq!(summary.sentiment, SentimentLabel::Neutral);
    assert_eq!(summary.signal, None);

    let summary = classify(-5.0, -0.1);
    assert_eq!(summary.sentiment, SentimentLabel::Neutral);
    assert_eq!(summary.signal, None);
}
