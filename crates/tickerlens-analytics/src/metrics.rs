//! Performance metrics over cumulative curves and daily returns.
//!
//! Every ratio has a fixed fallback instead of a division by zero: an empty
//! or degenerate input yields `0.0`.

use serde::{Deserialize, Serialize};
use tickerlens_core::DateRange;

use crate::config::{EngineConfig, StdDevKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub cagr: f64,
    pub sharpe: f64,
    /// Percent, always `<= 0`.
    pub max_drawdown: f64,
    pub total_return_pct: f64,
}

impl PerformanceMetrics {
    /// `returns[0]` is the seed day and is excluded from the Sharpe ratio.
    pub fn compute(
        cumulative: &[f64],
        returns: &[f64],
        range: DateRange,
        config: &EngineConfig,
    ) -> Self {
        let observed = returns.get(1..).unwrap_or_default();
        Self {
            cagr: cagr(cumulative, range, config.days_per_year),
            sharpe: sharpe(
                observed,
                config.sharpe_std_dev,
                config.trading_days_per_year,
            ),
            max_drawdown: max_drawdown(cumulative),
            total_return_pct: total_return_pct(cumulative),
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population divides by `n`, sample by `n - 1`; too few values gives `0.0`.
pub fn std_dev(values: &[f64], kind: StdDevKind) -> f64 {
    let denominator = match kind {
        StdDevKind::Population => values.len(),
        StdDevKind::Sample => values.len().saturating_sub(1),
    };
    if denominator == 0 {
        return 0.0;
    }
    let mean = mean(values);
    let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    (squares / denominator as f64).sqrt()
}

pub fn cagr(cumulative: &[f64], range: DateRange, days_per_year: f64) -> f64 {
    let Some(&last) = cumulative.last() else {
        return 0.0;
    };
    let years = range.elapsed_days() as f64 / days_per_year;
    if years <= 0.0 || last <= 0.0 {
        return 0.0;
    }
    last.powf(1.0 / years) - 1.0
}

pub fn sharpe(returns: &[f64], kind: StdDevKind, periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let deviation = std_dev(returns, kind);
    if deviation == 0.0 {
        return 0.0;
    }
    (mean(returns) * periods_per_year) / (deviation * periods_per_year.sqrt())
}

/// Deepest peak-to-trough decline in percent; `0.0` for a series that never falls.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in values {
        peak = peak.max(value);
        if peak > 0.0 {
            worst = worst.min((value / peak - 1.0) * 100.0);
        }
    }
    worst
}

pub fn total_return_pct(cumulative: &[f64]) -> f64 {
    cumulative
        .last()
        .map_or(0.0, |last| (last - 1.0) * 100.0)
}
