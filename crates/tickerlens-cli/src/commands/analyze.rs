use serde::Serialize;
use tickerlens_analytics::{Analysis, EngineConfig};
use tickerlens_core::{Symbol, TradingDate};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::{parse_date_or, today, CommandResult, Context};

#[derive(Debug, Serialize)]
struct AnalyzeResponseData<'a> {
    as_of: TradingDate,
    #[serde(flatten)]
    analysis: &'a Analysis,
    sentiment_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal_text: Option<&'static str>,
}

pub fn run(args: &AnalyzeArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let as_of = parse_date_or(args.as_of.as_deref(), today())?;

    let config = EngineConfig {
        history_days: args.days.unwrap_or(context.config.history_days),
        horizon: args.horizon.unwrap_or(context.config.horizon),
        ..context.config.clone()
    };
    config
        .validate()
        .map_err(|error| CliError::Command(error.to_string()))?;

    let engine = context.engine(config);
    let analysis = engine.analyze_symbol(&symbol, as_of)?;

    let data = serde_json::to_value(AnalyzeResponseData {
        as_of,
        analysis: &analysis,
        sentiment_summary: analysis.sentiment.headline_summary(),
        signal_text: analysis.summary.signal.map(|signal| signal.as_str()),
    })?;

    Ok(CommandResult::ok(data, vec![context.provider()])
        .with_news_failure(context.provider(), analysis.news_failure.as_ref()))
}
