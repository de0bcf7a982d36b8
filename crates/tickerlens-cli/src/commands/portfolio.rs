use serde::Serialize;
use tickerlens_core::{
    EnvelopeError, PortfolioValuation, ProviderId, Quote, QuoteRequest, Symbol,
};

use crate::cli::PortfolioArgs;
use crate::error::CliError;

use super::{adapter_for, CommandResult, Context};

#[derive(Debug, Serialize)]
struct PortfolioResponseData {
    user: Option<String>,
    #[serde(flatten)]
    valuation: PortfolioValuation,
}

pub fn run(args: &PortfolioArgs, context: &Context) -> Result<CommandResult, CliError> {
    let mut session = context.sessions.load()?;
    if !args.shares.is_empty() {
        for raw in &args.shares {
            let (symbol, shares) = parse_holding(raw)?;
            session.set_shares(symbol, shares)?;
        }
        context.sessions.save(&session)?;
    }

    let mut warnings = Vec::new();
    let mut source = context.source();
    let mut source_chain = vec![source.id()];
    if !source.capabilities().quote {
        warnings.push(format!("{} does not serve quotes; using yahoo", source.id()));
        source = adapter_for(ProviderId::Yahoo);
        source_chain.push(source.id());
    }

    let mut errors = Vec::new();
    let quotes: Vec<Quote> = if session.watchlist.is_empty() {
        Vec::new()
    } else {
        let request = QuoteRequest::new(session.watchlist.clone())
            .map_err(|error| CliError::Command(error.to_string()))?;
        match source.quote(&request) {
            Ok(batch) => batch.quotes,
            Err(error) => {
                errors.push(EnvelopeError::from_source_error(source.id(), &error));
                Vec::new()
            }
        }
    };

    let data = serde_json::to_value(PortfolioResponseData {
        valuation: session.value(&quotes),
        user: session.user,
    })?;

    let mut result = CommandResult::ok(data, source_chain);
    for warning in warnings {
        result = result.with_warning(warning);
    }
    for error in errors {
        result = result.with_error(error);
    }
    Ok(result)
}

/// Parses `SYMBOL=COUNT`.
fn parse_holding(raw: &str) -> Result<(Symbol, f64), CliError> {
    let Some((symbol, count)) = raw.split_once('=') else {
        return Err(CliError::Command(format!(
            "--shares expects SYMBOL=COUNT, got '{raw}'"
        )));
    };
    let shares = count
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::Command(format!("share count '{count}' is not a number")))?;
    Ok((Symbol::parse(symbol)?, shares))
}
