//! CLI error types with miette diagnostics.
//!
//! Maps core, config, and service failures into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use linkdeck_config::ConfigError;
use linkdeck_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Service ──────────────────────────────────────────────────────
    /// The service (or the client on its behalf) reported a failure.
    #[error("{message}")]
    #[diagnostic(code(linkdeck::api_error))]
    Api { message: String },

    #[error("Could not reach the link service: {message}")]
    #[diagnostic(
        code(linkdeck::connection_failed),
        help(
            "Check that the service is running and the profile's api_url is right.\n\
             Try: linkdeck config show"
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not logged in")]
    #[diagnostic(
        code(linkdeck::not_logged_in),
        help("Run: linkdeck auth login\nOr set LINKDECK_TOKEN to a bearer token.")
    )]
    NotLoggedIn,

    // ── Resources ────────────────────────────────────────────────────
    #[error("Link '{identifier}' not found")]
    #[diagnostic(
        code(linkdeck::not_found),
        help("Run: linkdeck links list to see your links")
    )]
    LinkNotFound { identifier: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(linkdeck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(linkdeck::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: linkdeck config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No link service configured")]
    #[diagnostic(
        code(linkdeck::no_config),
        help(
            "Create a profile with: linkdeck config init\n\
             Or pass --api-url / set LINKDECK_API_URL.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(linkdeck::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(linkdeck::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(linkdeck::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotLoggedIn => exit_code::AUTH,
            Self::LinkNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Error variant of an `ApiResponse`.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUrl { input } => CliError::Validation {
                field: "url".into(),
                reason: format!("'{input}' is not a valid URL"),
            },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::NotAuthenticated => CliError::NotLoggedIn,
            CoreError::ConnectionFailed { message } => CliError::ConnectionFailed { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                CliError::Api { message }
            }
        }
    }
}
