//! CLI configuration: thin wrapper around `linkdeck_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --timeout, ...).

use std::time::Duration;

use linkdeck_core::DashboardConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{Presentation, should_color};

// ── Re-exports from shared crate ────────────────────────────────────

pub use linkdeck_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref())
}

/// Build a `DashboardConfig` from the config file, profile, and CLI
/// overrides.
///
/// `--api-url` wins over the profile's URL and works without any profile.
/// An explicitly requested profile that does not exist is an error.
pub fn build_dashboard_config(global: &GlobalOpts) -> Result<DashboardConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None => {
            if global.profile.is_some() && global.api_url.is_none() {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: available_profiles(&cfg),
                });
            }
            let api_url = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile::new(api_url)
        }
    };

    if let Some(ref api_url) = global.api_url {
        profile.api_url.clone_from(api_url);
    }

    let mut config = linkdeck_config::profile_to_dashboard_config(&profile, &cfg.defaults)?;
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    tracing::debug!(profile = %profile_name, api_url = %config.api_url, "resolved service config");
    Ok(config)
}

/// Output format, color, and quiet mode: flags first, then `[defaults]`.
pub fn resolve_presentation(global: &GlobalOpts, cfg: &Config) -> Presentation {
    let format = global
        .output
        .unwrap_or_else(|| parse_output(&cfg.defaults.output));
    let color = global
        .color
        .unwrap_or_else(|| parse_color(&cfg.defaults.color));
    Presentation {
        format,
        color: should_color(color),
        quiet: global.quiet,
    }
}

fn parse_output(value: &str) -> OutputFormat {
    match value {
        "json" => OutputFormat::Json,
        "json-compact" => OutputFormat::JsonCompact,
        "yaml" => OutputFormat::Yaml,
        "plain" => OutputFormat::Plain,
        _ => OutputFormat::Table,
    }
}

fn parse_color(value: &str) -> ColorMode {
    match value {
        "always" => ColorMode::Always,
        "never" => ColorMode::Never,
        _ => ColorMode::Auto,
    }
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
