// Account endpoints
//
// Login and registration are anonymous and answer with the user record
// plus a bearer token. Everything under `auth/me` needs that token.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{LoginRequest, RegisterRequest, UpdateProfileRequest, User};

impl ApiClient {
    /// Exchange email + password for a user record carrying a token.
    ///
    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, Error> {
        debug!(email, "logging in");
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        self.post(&["auth", "login"], None, &body).await
    }

    /// Create an account. The service logs the new user in directly.
    ///
    /// `POST /auth/register`
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, Error> {
        debug!(email, "registering account");
        let body = RegisterRequest {
            name,
            email,
            password: password.expose_secret(),
        };
        self.post(&["auth", "register"], None, &body).await
    }

    /// Fetch the user the token belongs to.
    ///
    /// `GET /auth/me`
    pub async fn me(&self, token: Option<&SecretString>) -> Result<User, Error> {
        self.get(&["auth", "me"], token).await
    }

    /// Apply a partial profile update.
    ///
    /// `PATCH /auth/me`
    pub async fn update_me(
        &self,
        token: Option<&SecretString>,
        update: &UpdateProfileRequest,
    ) -> Result<User, Error> {
        debug!("updating profile");
        self.patch(&["auth", "me"], token, update).await
    }
}
