//! User session, watchlist, and portfolio bookkeeping.
//!
//! [`Session`] is a plain value: commands load it, mutate it, and hand it
//! back to [`SessionStore`] for persistence. Nothing here talks to providers;
//! valuation takes the quotes the caller already fetched.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{Quote, Symbol, ValidationError};

/// Holding assumed for a watchlist symbol with no explicit share count.
pub const DEFAULT_SHARES: f64 = 10.0;

const DEFAULT_WATCHLIST: [&str; 2] = ["NVDA", "AAPL"];
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<Symbol>,
    #[serde(default)]
    pub shares: BTreeMap<Symbol, f64>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            watchlist: default_watchlist(),
            shares: BTreeMap::new(),
        }
    }
}

fn default_watchlist() -> Vec<Symbol> {
    DEFAULT_WATCHLIST
        .iter()
        .filter_map(|raw| Symbol::parse(raw).ok())
        .collect()
}

impl Session {
    pub fn login(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        self.user = Some(name.to_owned());
        Ok(())
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Returns `false` when the symbol was already on the list.
    pub fn add_to_watchlist(&mut self, symbol: Symbol) -> bool {
        if self.watchlist.contains(&symbol) {
            return false;
        }
        self.watchlist.push(symbol);
        true
    }

    /// Removes the symbol together with any recorded holding.
    pub fn remove_from_watchlist(&mut self, symbol: &Symbol) -> bool {
        let before = self.watchlist.len();
        self.watchlist.retain(|existing| existing != symbol);
        self.shares.remove(symbol);
        self.watchlist.len() != before
    }

    /// Records a holding; symbols not yet watched are added to the watchlist.
    pub fn set_shares(&mut self, symbol: Symbol, shares: f64) -> Result<(), ValidationError> {
        if !shares.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "shares" });
        }
        if shares < 0.0 {
            return Err(ValidationError::NegativeValue { field: "shares" });
        }
        self.add_to_watchlist(symbol.clone());
        self.shares.insert(symbol, shares);
        Ok(())
    }

    pub fn shares(&self, symbol: &Symbol) -> f64 {
        self.shares.get(symbol).copied().unwrap_or(DEFAULT_SHARES)
    }

    /// Values every watched symbol that has a quote; the rest are skipped.
    pub fn value(&self, quotes: &[Quote]) -> PortfolioValuation {
        let positions: Vec<Position> = self
            .watchlist
            .iter()
            .filter_map(|symbol| {
                let quote = quotes.iter().find(|quote| &quote.symbol == symbol)?;
                let shares = self.shares(symbol);
                Some(Position {
                    symbol: symbol.clone(),
                    shares,
                    price: quote.price,
                    value: shares * quote.price,
                })
            })
            .collect();

        PortfolioValuation {
            total_value: positions.iter().map(|position| position.value).sum(),
            asset_count: positions.len(),
            watchlist_len: self.watchlist.len(),
            positions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    pub shares: f64,
    pub price: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub positions: Vec<Position>,
    pub total_value: f64,
    pub asset_count: usize,
    pub watchlist_len: usize,
}

/// JSON file store for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(resolve_home().join(SESSION_FILE))
    }
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means a fresh session.
    pub fn load(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no session file, starting fresh");
            return Ok(Session::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

/// `TICKERLENS_HOME` when set, otherwise `$HOME/.tickerlens`.
pub fn resolve_home() -> PathBuf {
    if let Some(path) = env::var_os("TICKERLENS_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".tickerlens");
    }

    PathBuf::from(".tickerlens")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    fn quote(raw: &str, price: f64) -> Quote {
        Quote::new(
            symbol(raw),
            price,
            "USD",
            UtcDateTime::parse("2024-03-01T00:00:00Z").expect("timestamp"),
        )
        .expect("quote")
    }

    #[test]
    fn fresh_session_watches_defaults() {
        let session = Session::default();
        assert_eq!(session.watchlist, vec![symbol("NVDA"), symbol("AAPL")]);
        assert_eq!(session.shares(&symbol("NVDA")), DEFAULT_SHARES);
        assert!(!session.is_logged_in());
    }

    #[test]
    fn login_requires_a_name() {
        let mut session = Session::default();
        assert_eq!(session.login("   "), Err(ValidationError::EmptyUserName));
        session.login(" ada ").expect("login");
        assert_eq!(session.user.as_deref(), Some("ada"));
        session.logout();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn watchlist_ignores_duplicates_and_normalises_case() {
        let mut session = Session::default();
        assert!(!session.add_to_watchlist(symbol("nvda")));
        assert!(session.add_to_watchlist(symbol("btc-usd")));
        assert_eq!(session.watchlist.len(), 3);
        assert!(session.remove_from_watchlist(&symbol("AAPL")));
        assert!(!session.remove_from_watchlist(&symbol("AAPL")));
    }

    #[test]
    fn negative_shares_are_rejected() {
        let mut session = Session::default();
        let err = session
            .set_shares(symbol("AAPL"), -1.0)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::NegativeValue { field: "shares" });
    }

    #[test]
    fn valuation_skips_symbols_without_quotes() {
        let mut session = Session::default();
        session.set_shares(symbol("AAPL"), 4.0).expect("shares");

        let valuation = session.value(&[quote("NVDA", 100.0), quote("AAPL", 50.0)]);
        assert_eq!(valuation.asset_count, 2);
        assert!((valuation.total_value - 1_200.0).abs() < 1e-9);

        let partial = session.value(&[quote("AAPL", 50.0)]);
        assert_eq!(partial.asset_count, 1);
        assert_eq!(partial.watchlist_len, 2);
        assert!((partial.total_value - 200.0).abs() < 1e-9);
    }

    #[test]
    fn store_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().expect("fresh"), Session::default());

        let mut session = Session::default();
        session.login("ada").expect("login");
        session.set_shares(symbol("ETH-USD"), 0.5).expect("shares");
        store.save(&session).expect("save");

        assert_eq!(store.load().expect("load"), session);
    }

    #[test]
    fn corrupt_session_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").expect("write");

        let err = SessionStore::new(path).load().expect_err("must fail");
        assert!(matches!(err, SessionError::Serialization(_)));
    }
}
