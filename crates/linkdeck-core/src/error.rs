// ── Core error types ──
//
// User-facing errors from linkdeck-core. Consumers never match on HTTP
// transport details; the `From<linkdeck_api::Error>` impl folds them into
// the variants below, keeping the server's message intact.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Please enter a valid URL")]
    InvalidUrl { input: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Session errors ───────────────────────────────────────────────
    #[error("Not logged in")]
    NotAuthenticated,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
    },

    /// The request never got an answer (refused, DNS, timeout).
    #[error("{message}")]
    ConnectionFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status of the underlying API failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<linkdeck_api::Error> for CoreError {
    fn from(err: linkdeck_api::Error) -> Self {
        if err.is_connection() {
            return CoreError::ConnectionFailed {
                message: err.user_message(),
            };
        }
        match err {
            linkdeck_api::Error::Client(message) => CoreError::Config { message },
            other => CoreError::Api {
                message: other.user_message(),
                status: other.status(),
            },
        }
    }
}
