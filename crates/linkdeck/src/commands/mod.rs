//! Command dispatch: bridges CLI args -> dashboard operations -> output formatting.

pub mod analytics;
pub mod auth;
pub mod config_cmd;
pub mod links;
pub mod metadata;
pub mod util;

use linkdeck_core::{Dashboard, Session};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output::Presentation;

/// Everything a service-bound handler needs.
pub struct Context<'a> {
    pub dashboard: &'a Dashboard,
    /// Stored (or `LINKDECK_TOKEN`) session, if any.
    pub session: Option<&'a Session>,
    pub global: &'a GlobalOpts,
    pub out: Presentation,
}

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(args, ctx).await,
        Command::Links(args) => links::handle(args, ctx).await,
        Command::Analytics(args) => analytics::handle(args, ctx).await,
        Command::Metadata(args) => metadata::handle(args, ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
