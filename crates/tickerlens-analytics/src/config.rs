//! Engine tuning loaded from `config.json` under the tickerlens home.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tickerlens_core::resolve_home;
use tracing::debug;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config '{path}' is not valid: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("config field '{field}' {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Standard deviation estimator used by the Sharpe ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevKind {
    #[default]
    Population,
    Sample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Forecast steps past the last observed close.
    pub horizon: usize,
    /// Minimum closes `analyze` accepts.
    pub min_history: usize,
    pub volatility_window: usize,
    pub trading_days_per_year: f64,
    pub days_per_year: f64,
    pub sharpe_std_dev: StdDevKind,
    /// Calendar days of price history fetched by `analyze`.
    pub history_days: u32,
    /// Headlines fetched for `analyze` and `sentiment`.
    pub headline_limit: usize,
    /// Headlines fetched across a whole backtest range.
    pub backtest_headline_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon: 7,
            min_history: 7,
            volatility_window: 30,
            trading_days_per_year: 252.0,
            days_per_year: 365.25,
            sharpe_std_dev: StdDevKind::Population,
            history_days: 90,
            headline_limit: 50,
            backtest_headline_limit: 1000,
        }
    }
}

impl EngineConfig {
    pub fn default_path() -> PathBuf {
        resolve_home().join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// An explicit path must exist; the home config is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon == 0 {
            return Err(invalid("horizon", "must be at least 1"));
        }
        if self.min_history < 2 {
            return Err(invalid("min_history", "must be at least 2"));
        }
        if self.volatility_window == 0 {
            return Err(invalid("volatility_window", "must be at least 1"));
        }
        if !(self.trading_days_per_year.is_finite() && self.trading_days_per_year > 0.0) {
            return Err(invalid("trading_days_per_year", "must be a positive number"));
        }
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(invalid("days_per_year", "must be a positive number"));
        }
        if self.history_days == 0 {
            return Err(invalid("history_days", "must be at least 1"));
        }
        if self.headline_limit == 0 {
            return Err(invalid("headline_limit", "must be at least 1"));
        }
        if self.backtest_headline_limit == 0 {
            return Err(invalid("backtest_headline_limit", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"horizon": 14, "sharpe_std_dev": "sample"}"#).expect("write");

        let config = EngineConfig::load(&path).expect("config");
        assert_eq!(config.horizon, 14);
        assert_eq!(config.sharpe_std_dev, StdDevKind::Sample);
        assert_eq!(config.min_history, 7);
        assert_eq!(config.trading_days_per_year, 252.0);
        assert_eq!(config.backtest_headline_limit, 1000);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"horizn": 14}"#).expect("write");

        let err = EngineConfig::load(&path).expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_horizon_is_invalid() {
        let config = EngineConfig {
            horizon: 0,
            ..EngineConfig::default()
        };
        let err = config.validate().expect_err("must fail");
        assert!(matches!(err, ConfigError::Invalid { field: "horizon", .. }));
    }

    #[test]
    fn zero_backtest_headline_limit_is_invalid() {
        let config = EngineConfig {
            backtest_headline_limit: 0,
            ..EngineConfig::default()
        };
        let err = config.validate().expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "backtest_headline_limit",
                ..
            }
        ));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = EngineConfig::resolve(Some(&dir.path().join("absent.json")))
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
