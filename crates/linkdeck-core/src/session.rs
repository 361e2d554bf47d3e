// ── Authenticated session ──
//
// An explicit value handed to every request that needs auth. Nothing in
// this crate keeps a "current user" global; the CLI loads a session from
// disk and passes it down.

use linkdeck_api::User;
use secrecy::SecretString;

use crate::error::CoreError;

/// A bearer token plus, when known, the user it belongs to.
///
/// `user` is `None` for sessions built from a bare token (for example one
/// supplied through the environment) until `whoami` fills it in.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: SecretString, user: Option<User>) -> Self {
        Self { token, user }
    }

    /// Build a session from a login/register response.
    ///
    /// The service returns the token inside the user record; it is moved
    /// out so the stored `User` never carries it in plain text.
    pub fn from_login(mut user: User) -> Result<Self, CoreError> {
        let token = user
            .token
            .take()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoreError::Api {
                message: "Login response did not include a session token".into(),
                status: None,
            })?;
        Ok(Self {
            token: SecretString::from(token),
            user: Some(user),
        })
    }

    /// The session itself, or [`CoreError::NotAuthenticated`] when there
    /// is none. For operations the service never answers anonymously.
    pub fn require(session: Option<&Session>) -> Result<&Session, CoreError> {
        session.ok_or(CoreError::NotAuthenticated)
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Email of the logged-in user, if known.
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}
