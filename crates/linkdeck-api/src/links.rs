// Link CRUD endpoints

use secrecy::SecretString;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateLinkPayload, Link, UpdateLinkRequest};

impl ApiClient {
    /// `POST /links`
    pub async fn create_link(
        &self,
        token: Option<&SecretString>,
        payload: &CreateLinkPayload,
    ) -> Result<Link, Error> {
        debug!(destination = %payload.destination_url, slug = ?payload.slug, "creating link");
        self.post(&["links"], token, payload).await
    }

    /// `GET /links`
    pub async fn list_links(&self, token: Option<&SecretString>) -> Result<Vec<Link>, Error> {
        self.get(&["links"], token).await
    }

    /// `GET /links/:id`
    pub async fn get_link(&self, token: Option<&SecretString>, id: &str) -> Result<Link, Error> {
        self.get(&["links", id], token).await
    }

    /// `PATCH /links/:id`
    pub async fn update_link(
        &self,
        token: Option<&SecretString>,
        id: &str,
        update: &UpdateLinkRequest,
    ) -> Result<Link, Error> {
        debug!(id, "updating link");
        self.patch(&["links", id], token, update).await
    }

    /// `DELETE /links/:id`
    pub async fn delete_link(&self, token: Option<&SecretString>, id: &str) -> Result<(), Error> {
        debug!(id, "deleting link");
        self.delete(&["links", id], token).await
    }
}
