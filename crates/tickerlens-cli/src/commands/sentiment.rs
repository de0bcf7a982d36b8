use serde::Serialize;
use tickerlens_analytics::{DailySentiment, SentimentReport};
use tickerlens_core::{DateRange, Symbol};

use crate::cli::SentimentArgs;
use crate::error::CliError;

use super::{parse_date_or, today, CommandResult, Context};

/// Default news window when `--start` is omitted.
const DEFAULT_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Serialize)]
struct SentimentResponseData {
    symbol: Symbol,
    range: DateRange,
    summary: String,
    report: SentimentReport,
    daily: DailySentiment,
}

pub fn run(args: &SentimentArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let end = parse_date_or(args.end.as_deref(), today())?;
    let fallback_start = DateRange::trailing(end, DEFAULT_WINDOW_DAYS).start;
    let start = parse_date_or(args.start.as_deref(), fallback_start)?;
    let range = DateRange::new(start, end)?;

    let engine = context.engine(context.config.clone());
    let news = engine.fetch_headlines(&symbol, range);
    let report = engine.score_sentiment(&news.headlines);

    let data = serde_json::to_value(SentimentResponseData {
        summary: report.headline_summary(),
        daily: engine.daily_sentiment(&news.headlines),
        symbol,
        range,
        report,
    })?;

    let mut result = CommandResult::ok(data, vec![context.provider()])
        .with_news_failure(context.provider(), news.failure.as_ref())
        .with_news_truncation(news.truncated_after);
    if news.failure.is_none() && news.headlines.is_empty() {
        result = result.with_warning("no headlines published in the requested range");
    }
    Ok(result)
}
