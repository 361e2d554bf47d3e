//! Shared helpers for command handlers.

use std::io::{self, BufRead, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};
use linkdeck_core::{ApiResponse, Link, Session};

use crate::commands::Context;
use crate::error::CliError;

/// Unwrap an `ApiResponse`, turning the error variant into `CliError::Api`.
pub fn respond<T>(response: ApiResponse<T>) -> Result<T, CliError> {
    response.into_result().map_err(CliError::api)
}

/// The active session, or `NotLoggedIn`.
pub fn require_session<'a>(ctx: &Context<'a>) -> Result<&'a Session, CliError> {
    Ok(Session::require(ctx.session)?)
}

/// Resolve a link identifier (id or slug) through the dashboard, which
/// refreshes its cached list once when the identifier is unknown.
pub async fn resolve_link(ctx: &Context<'_>, identifier: &str) -> Result<Link, CliError> {
    respond(ctx.dashboard.lookup_link(ctx.session, identifier).await)?.ok_or_else(|| {
        CliError::LinkNotFound {
            identifier: identifier.into(),
        }
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Read a value given on the command line, or prompt for it.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_err),
    }
}

/// Read a password from the first line of stdin, or prompt without echo.
pub fn read_password(prompt: &str, from_stdin: bool) -> Result<String, CliError> {
    let password = if from_stdin {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).to_owned()
    } else {
        rpassword::prompt_password(prompt).map_err(prompt_err)?
    };
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(password)
}

/// Spinner on stderr while a request is in flight. Hidden in quiet mode
/// and when stderr is not a terminal.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}
