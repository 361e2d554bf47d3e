mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use linkdeck_core::Dashboard;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let presentation = config::resolve_presentation(&cli.global, &cfg);

    match cli.command {
        // Config commands don't need the service
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, &presentation),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "linkdeck", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let dashboard = Dashboard::new(config::build_dashboard_config(&cli.global)?)?;
            let session = linkdeck_config::session::load_session()?;

            tracing::debug!(command = ?cmd, logged_in = session.is_some(), "dispatching command");
            let ctx = commands::Context {
                dashboard: &dashboard,
                session: session.as_ref(),
                global: &cli.global,
                out: presentation,
            };
            commands::dispatch(cmd, &ctx).await
        }
    }
}
