use tickerlens_analytics::StrategyKind;
use tickerlens_core::{DateRange, Symbol, TradingDate};

use crate::cli::BacktestArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub fn run(args: &BacktestArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let range = DateRange::new(TradingDate::parse(&args.start)?, TradingDate::parse(&args.end)?)?;
    let kind = StrategyKind::from(args.strategy);

    let engine = context.engine(context.config.clone());
    let run = engine.backtest_symbol(&symbol, range, args.capital, kind)?;

    let data = serde_json::to_value(&run.result)?;
    let mut result = CommandResult::ok(data, vec![context.provider()])
        .with_news_failure(context.provider(), run.news_failure.as_ref())
        .with_news_truncation(run.news_truncated_after);
    if kind == StrategyKind::Sentiment && run.result.exposure.iter().all(|weight| *weight == 0.0) {
        result = result.with_warning("no positive sentiment days; the strategy stayed in cash");
    }
    Ok(result)
}
