//! Auth subcommand handlers: login, register, logout, whoami, update.

use linkdeck_core::{Session, UpdateProfileRequest, User};
use secrecy::SecretString;

use crate::cli::{AuthArgs, AuthCommand};
use crate::commands::Context;
use crate::commands::util::{read_password, require_session, respond, spinner, value_or_prompt};
use crate::error::CliError;
use crate::output::{self, Presentation};

fn user_detail(user: &User, color: bool) -> String {
    let mut rows = vec![
        ("Name", user.name.clone()),
        ("Email", user.email.clone()),
        ("ID", user.id.clone()),
    ];
    if let Some(created) = user.created_at {
        rows.push(("Joined", created.format("%Y-%m-%d").to_string()));
    }
    output::detail_block(&rows, color)
}

fn print_user(user: &User, out: &Presentation) -> Result<(), CliError> {
    let rendered = output::render_single(
        out.format,
        user,
        |u| user_detail(u, out.color),
        |u| u.email.clone(),
    )?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}

fn persist(session: &Session, out: &Presentation) -> Result<(), CliError> {
    linkdeck_config::session::save_session(session)?;
    let who = session.email().unwrap_or("session");
    output::status(&format!("Logged in as {who}"), out);
    Ok(())
}

pub async fn handle(args: AuthArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let dashboard = ctx.dashboard;
    let out = &ctx.out;

    match args.command {
        AuthCommand::Login {
            email,
            password_stdin,
        } => {
            let email = value_or_prompt(email, "Email")?;
            let password = SecretString::from(read_password("Password: ", password_stdin)?);

            let bar = spinner("Logging in...", out.quiet);
            let response = dashboard.login(&email, &password).await;
            bar.finish_and_clear();

            let session = respond(response)?;
            persist(&session, out)
        }

        AuthCommand::Register {
            name,
            email,
            password_stdin,
        } => {
            let name = value_or_prompt(name, "Name")?;
            let email = value_or_prompt(email, "Email")?;
            let password = SecretString::from(read_password("Password: ", password_stdin)?);

            let bar = spinner("Creating account...", out.quiet);
            let response = dashboard.register(&name, &email, &password).await;
            bar.finish_and_clear();

            let session = respond(response)?;
            persist(&session, out)
        }

        AuthCommand::Logout => {
            if linkdeck_config::session::clear_session()? {
                output::status("Logged out", out);
            } else {
                output::status("No stored session", out);
            }
            Ok(())
        }

        AuthCommand::Whoami => {
            let session = require_session(ctx)?;
            let user = respond(dashboard.me(Some(session)).await)?;
            print_user(&user, out)
        }

        AuthCommand::Update {
            name,
            email,
            password,
        } => {
            let session = require_session(ctx)?;
            let password = if password {
                Some(read_password("New password: ", false)?)
            } else {
                None
            };
            let update = UpdateProfileRequest {
                name,
                email,
                password,
            };
            let user = respond(dashboard.update_profile(Some(session), &update).await)?;

            // Keep the stored session's user in step with the service.
            let refreshed = Session::new(session.token().clone(), Some(user.clone()));
            linkdeck_config::session::save_session(&refreshed)?;

            output::status("Profile updated", out);
            print_user(&user, out)
        }
    }
}
