use serde::Serialize;

use crate::cli::LoginArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct SessionResponseData {
    user: Option<String>,
    logged_in: bool,
}

pub fn login(args: &LoginArgs, context: &Context) -> Result<CommandResult, CliError> {
    let mut session = context.sessions.load()?;
    session.login(&args.name)?;
    context.sessions.save(&session)?;

    let data = serde_json::to_value(SessionResponseData {
        logged_in: session.is_logged_in(),
        user: session.user,
    })?;
    Ok(CommandResult::ok(data, vec![context.provider()]))
}

pub fn logout(context: &Context) -> Result<CommandResult, CliError> {
    let mut session = context.sessions.load()?;
    let was_logged_in = session.is_logged_in();
    session.logout();
    context.sessions.save(&session)?;

    let data = serde_json::to_value(SessionResponseData {
        user: None,
        logged_in: false,
    })?;
    let result = CommandResult::ok(data, vec![context.provider()]);
    if was_logged_in {
        Ok(result)
    } else {
        Ok(result.with_warning("no user was logged in"))
    }
}
