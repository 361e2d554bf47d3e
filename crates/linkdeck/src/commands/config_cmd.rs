//! Config subcommand handlers.

use dialoguer::Input;
use linkdeck_core::DEFAULT_DOMAIN;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::commands::util::prompt_err;
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output::{self, Presentation};

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts, out: &Presentation) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("✨ linkdeck configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(global.profile.clone().unwrap_or_else(|| "default".into()))
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("Service URL")
                .default(
                    global
                        .api_url
                        .clone()
                        .unwrap_or_else(|| "http://localhost:3000/api".into()),
                )
                .interact_text()
                .map_err(prompt_err)?;

            let domain: String = Input::new()
                .with_prompt("Short link domain")
                .default(DEFAULT_DOMAIN.into())
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile::new(String::new());
            profile.set("api_url", api_url.trim())?;
            if domain.trim() != DEFAULT_DOMAIN {
                profile.set("domain", domain.trim())?;
            }

            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Next: linkdeck auth login");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let rendered = output::render_single(
                out.format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# {e}")),
                |c| config::active_profile_name(global, c),
            )?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), out.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            if !cfg.profiles.contains_key(&profile_name) && key != "api_url" {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: config::available_profiles(&cfg),
                });
            }
            cfg.profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile::new(String::new()))
                .set(&key, &value)?;

            config::save_config(&cfg)?;
            output::status(&format!("Set {key} on profile '{profile_name}'"), out);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::status(&format!("Default profile set to '{name}'"), out);
            Ok(())
        }
    }
}
