use thiserror::Error;

/// Message used when the server rejects a request without saying why.
pub const FALLBACK_HTTP_MESSAGE: &str = "Request failed";

/// Message used when a transport failure carries no description.
pub const FALLBACK_NETWORK_MESSAGE: &str = "Network error";

/// Top-level error type for the `linkdeck-api` crate.
///
/// Covers every failure mode of the service client and the metadata
/// fetcher. `linkdeck-core` folds these into its uniform two-variant
/// response, so [`user_message`](Self::user_message) is what end users see.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the server-supplied message, or
    /// [`FALLBACK_HTTP_MESSAGE`] when the body carried none.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body did not match the expected shape, with the raw body
    /// kept for debugging.
    #[error("Invalid response from server: {message}")]
    Deserialization { message: String, body: String },

    /// A fetched page was not markup (image, binary download, ...).
    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },
}

impl Error {
    /// The human-readable message carried into the error variant of an
    /// API response.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Transport(e) => {
                let message = e.to_string();
                if message.trim().is_empty() {
                    FALLBACK_NETWORK_MESSAGE.to_owned()
                } else {
                    message
                }
            }
            other => other.to_string(),
        }
    }

    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the session token was rejected and logging in
    /// again might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the request never got an answer from the server.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_surfaces_server_message() {
        let err = Error::Http {
            status: 409,
            message: "Slug already taken".into(),
        };
        assert_eq!(err.user_message(), "Slug already taken");
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_not_found());
    }

    #[test]
    fn unauthorized_counts_as_expired_session() {
        let err = Error::Http {
            status: 401,
            message: FALLBACK_HTTP_MESSAGE.into(),
        };
        assert!(err.is_auth_expired());
    }

    #[test]
    fn deserialization_message_is_prefixed() {
        let err = Error::Deserialization {
            message: "missing field `data`".into(),
            body: "{}".into(),
        };
        assert_eq!(
            err.user_message(),
            "Invalid response from server: missing field `data`"
        );
        assert_eq!(err.status(), None);
    }
}
