//! Shared configuration for the linkdeck CLI.
//!
//! TOML profiles, figment layering (defaults, file, `LINKDECK_*` env),
//! the persisted login session, and translation to
//! `linkdeck_core::DashboardConfig`. The CLI adds flag-aware wrappers on top.

pub mod session;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use linkdeck_core::DashboardConfig;

pub use session::{StoredSession, TOKEN_ENV};

/// Prefix for environment overrides (`LINKDECK_DEFAULTS__OUTPUT=json`).
pub const ENV_PREFIX: &str = "LINKDECK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("session file is corrupt: {0}")]
    Session(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named link-service profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named link-service profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g. "https://api.lnk.example").
    pub api_url: String,

    /// Domain attached to new short links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Override the service timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Destination-page fetch timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_timeout: Option<u64>,

    /// User agent sent to destination pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// QR rendering endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_service: Option<String>,
}

impl Profile {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            domain: None,
            timeout: None,
            metadata_timeout: None,
            user_agent: None,
            qr_service: None,
        }
    }

    /// Set one field by its TOML key, as `config set` does.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse_secs = |field: &str| {
            value.parse::<u64>().map_err(|_| ConfigError::Validation {
                field: field.into(),
                reason: format!("expected whole seconds, got '{value}'"),
            })
        };
        match key {
            "api_url" => {
                validate_url("api_url", value)?;
                self.api_url = value.to_owned();
            }
            "domain" => self.domain = Some(value.to_owned()),
            "timeout" => self.timeout = Some(parse_secs("timeout")?),
            "metadata_timeout" => self.metadata_timeout = Some(parse_secs("metadata_timeout")?),
            "user_agent" => self.user_agent = Some(value.to_owned()),
            "qr_service" => {
                validate_url("qr_service", value)?;
                self.qr_service = Some(value.to_owned());
            }
            other => {
                return Err(ConfigError::Validation {
                    field: other.into(),
                    reason: "unknown profile key (expected api_url, domain, timeout, \
                             metadata_timeout, user_agent, or qr_service)"
                        .into(),
                });
            }
        }
        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<url::Url, ConfigError> {
    value.parse::<url::Url>().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{value}': {e}"),
    })
}

impl Config {
    /// Name of the profile to use: explicit choice, else the configured
    /// default, else `"default"`.
    pub fn profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }
}

// ── Config file paths ───────────────────────────────────────────────

/// Directory holding `config.toml` and `session.json`, via XDG /
/// platform conventions.
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "linkdeck", "linkdeck").map_or_else(dirs_fallback, |dirs| {
        dirs.config_dir().to_path_buf()
    })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("linkdeck");
    p
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn session_path() -> PathBuf {
    config_dir().join("session.json")
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from `path` + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config, returning a default if it is missing or unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `DashboardConfig` from a profile. Profile values win over
/// `defaults`; unset values keep the core defaults.
pub fn profile_to_dashboard_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<DashboardConfig, ConfigError> {
    let api_url = validate_url("api_url", &profile.api_url)?;

    let mut config = DashboardConfig::new(api_url);
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    if let Some(domain) = &profile.domain {
        config.domain.clone_from(domain);
    }
    if let Some(secs) = profile.metadata_timeout {
        config.metadata_timeout = Duration::from_secs(secs);
    }
    if let Some(user_agent) = &profile.user_agent {
        config.metadata_user_agent.clone_from(user_agent);
    }
    if let Some(qr_service) = &profile.qr_service {
        validate_url("qr_service", qr_service)?;
        config.qr_service.clone_from(qr_service);
    }
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut profile = Profile::new("https://api.lnk.example");
        profile.domain = Some("go.example".into());
        profile.metadata_timeout = Some(3);
        cfg.profiles.insert("work".into(), profile.clone());
        cfg.default_profile = Some("work".into());

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.profiles.get("work"), Some(&profile));
        assert_eq!(loaded.profile_name(None), "work");
        assert_eq!(loaded.profile_name(Some("other")), "other");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
output = "json"

[profiles.default]
api_url = "http://localhost:4000/api"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        assert_eq!(cfg.profiles["default"].api_url, "http://localhost:4000/api");
    }

    #[test]
    fn dashboard_config_applies_overrides() {
        let mut profile = Profile::new("https://api.lnk.example");
        profile.domain = Some("go.example".into());
        profile.timeout = Some(12);
        profile.metadata_timeout = Some(2);

        let dc = profile_to_dashboard_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(dc.domain, "go.example");
        assert_eq!(dc.timeout, Duration::from_secs(12));
        assert_eq!(dc.metadata_timeout, Duration::from_secs(2));
        assert_eq!(dc.api_url.as_str(), "https://api.lnk.example/");
    }

    #[test]
    fn dashboard_config_uses_global_timeout_and_core_defaults() {
        let profile = Profile::new("https://api.lnk.example");
        let defaults = Defaults {
            timeout: 9,
            ..Defaults::default()
        };
        let dc = profile_to_dashboard_config(&profile, &defaults).unwrap();
        assert_eq!(dc.timeout, Duration::from_secs(9));
        assert_eq!(dc.domain, linkdeck_core::DEFAULT_DOMAIN);
    }

    #[test]
    fn bad_api_url_is_rejected() {
        let profile = Profile::new("not a url");
        let err = profile_to_dashboard_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));
    }

    #[test]
    fn profile_set_validates_keys_and_values() {
        let mut profile = Profile::new("https://a.example");
        profile.set("domain", "go.example").unwrap();
        profile.set("metadata_timeout", "8").unwrap();
        assert_eq!(profile.domain.as_deref(), Some("go.example"));
        assert_eq!(profile.metadata_timeout, Some(8));

        assert!(profile.set("timeout", "soon").is_err());
        assert!(profile.set("api_url", "nope").is_err());
        assert!(profile.set("colour", "red").is_err());
    }
}
