use serde::Serialize;
use tickerlens_core::Symbol;

use crate::cli::{WatchlistArgs, WatchlistCommand};
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct WatchlistResponseData {
    watchlist: Vec<Symbol>,
    changed: bool,
}

pub fn run(args: &WatchlistArgs, context: &Context) -> Result<CommandResult, CliError> {
    let mut session = context.sessions.load()?;

    let (changed, warning) = match &args.command {
        WatchlistCommand::Add { symbol } => {
            let symbol = Symbol::parse(symbol)?;
            let added = session.add_to_watchlist(symbol.clone());
            (added, (!added).then(|| format!("{symbol} is already on the watchlist")))
        }
        WatchlistCommand::Remove { symbol } => {
            let symbol = Symbol::parse(symbol)?;
            let removed = session.remove_from_watchlist(&symbol);
            (removed, (!removed).then(|| format!("{symbol} was not on the watchlist")))
        }
        WatchlistCommand::List => (false, None),
    };

    if changed {
        context.sessions.save(&session)?;
    }

    let data = serde_json::to_value(WatchlistResponseData {
        watchlist: session.watchlist,
        changed,
    })?;
    let result = CommandResult::ok(data, vec![context.provider()]);
    Ok(match warning {
        Some(warning) => result.with_warning(warning),
        None => result,
    })
}
