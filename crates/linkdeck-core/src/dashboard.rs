// ── Dashboard facade ──
//
// The entry point for consumers. Owns the service client, the metadata
// fetcher, and the cached link list. Every network-facing operation
// answers with an `ApiResponse`; the session is passed in explicitly and
// decides whether a request carries `Authorization`.

use std::sync::Arc;

use linkdeck_api::{
    AnalyticsResponse, ApiClient, CreateLinkPayload, Link, MetadataFetcher,
    UpdateLinkRequest, UpdateProfileRequest, UrlMetadata, User,
};
use secrecy::SecretString;
use tracing::{debug, info};
use url::Url;

use crate::config::DashboardConfig;
use crate::error::CoreError;
use crate::payload::{LinkOptions, build_payload};
use crate::qr::qr_code_url;
use crate::response::ApiResponse;
use crate::session::Session;
use crate::store::LinkStore;
use crate::validate::prepare_destination;
use crate::view::{LinkQuery, visible_links};

fn token(session: Option<&Session>) -> Option<&SecretString> {
    session.map(Session::token)
}

/// Cheaply cloneable handle to one link service.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    api: ApiClient,
    metadata: MetadataFetcher,
    store: LinkStore,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.api_url.as_str(), &config.transport())?;
        let metadata = MetadataFetcher::new(&config.metadata())?;
        Ok(Self::with_clients(config, api, metadata))
    }

    /// Build from pre-made clients (custom transports, tests).
    pub fn with_clients(config: DashboardConfig, api: ApiClient, metadata: MetadataFetcher) -> Self {
        Self {
            inner: Arc::new(DashboardInner {
                config,
                api,
                metadata,
                store: LinkStore::new(),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// The cached link list.
    pub fn store(&self) -> &LinkStore {
        &self.inner.store
    }

    // ── Account ──────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &SecretString) -> ApiResponse<Session> {
        let result = self.inner.api.login(email, password).await;
        Self::open_session(result.map_err(CoreError::from)).into()
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> ApiResponse<Session> {
        let result = self.inner.api.register(name, email, password).await;
        Self::open_session(result.map_err(CoreError::from)).into()
    }

    fn open_session(result: Result<User, CoreError>) -> Result<Session, CoreError> {
        let session = Session::from_login(result?)?;
        info!(email = session.email().unwrap_or_default(), "session opened");
        Ok(session)
    }

    pub async fn me(&self, session: Option<&Session>) -> ApiResponse<User> {
        self.inner.api.me(token(session)).await.into()
    }

    pub async fn update_profile(
        &self,
        session: Option<&Session>,
        update: &UpdateProfileRequest,
    ) -> ApiResponse<User> {
        if update.is_empty() {
            return ApiResponse::error("Nothing to update");
        }
        self.inner.api.update_me(token(session), update).await.into()
    }

    // ── Links ────────────────────────────────────────────────────

    /// Refetch the link list. Replaces the cache on success, leaves it
    /// alone on failure.
    pub async fn refresh_links(&self, session: Option<&Session>) -> ApiResponse<Vec<Link>> {
        let response: ApiResponse<Vec<Link>> =
            self.inner.api.list_links(token(session)).await.into();
        if let ApiResponse::Success { data } = &response {
            debug!(count = data.len(), "link list refreshed");
            self.inner.store.replace_all(data.clone());
        }
        response
    }

    /// Filtered, sorted view over the cached list.
    pub fn visible_links(&self, query: &LinkQuery) -> Vec<Link> {
        let links = self.inner.store.links();
        visible_links(&links, query).into_iter().cloned().collect()
    }

    pub async fn get_link(&self, session: Option<&Session>, id: &str) -> ApiResponse<Link> {
        self.inner.api.get_link(token(session), id).await.into()
    }

    /// Find a link by id or slug, refetching the list when the cache
    /// does not know it. `Success { data: None }` means the service has
    /// no such link; `Error` means the refetch itself failed.
    pub async fn lookup_link(
        &self,
        session: Option<&Session>,
        id_or_slug: &str,
    ) -> ApiResponse<Option<Link>> {
        if let Some(link) = self.inner.store.find(id_or_slug) {
            return ApiResponse::success(Some(Link::clone(&link)));
        }
        if let ApiResponse::Error { message } = self.refresh_links(session).await {
            return ApiResponse::error(message);
        }
        let found = self.inner.store.find(id_or_slug).map(|link| Link::clone(&link));
        ApiResponse::success(found)
    }

    /// Like [`Self::lookup_link`], with a missing link reported as an error.
    pub async fn resolve_link(&self, session: Option<&Session>, id_or_slug: &str) -> ApiResponse<Link> {
        match self.lookup_link(session, id_or_slug).await {
            ApiResponse::Success { data: Some(link) } => ApiResponse::success(link),
            ApiResponse::Success { data: None } => {
                ApiResponse::error(format!("Link not found: {id_or_slug}"))
            }
            ApiResponse::Error { message } => ApiResponse::error(message),
        }
    }

    /// Validate the destination and assemble the create body without
    /// sending it.
    pub async fn prepare_link(
        &self,
        destination: &str,
        options: &LinkOptions,
    ) -> Result<CreateLinkPayload, CoreError> {
        let url = prepare_destination(destination)?;
        Ok(build_payload(&self.inner.metadata, &url, &self.inner.config.domain, options).await)
    }

    /// Validate, enrich, and create a link. The metadata fetch always
    /// finishes before the create request goes out.
    pub async fn create_link(
        &self,
        session: Option<&Session>,
        destination: &str,
        options: &LinkOptions,
    ) -> ApiResponse<Link> {
        let payload = match self.prepare_link(destination, options).await {
            Ok(payload) => payload,
            Err(e) => return ApiResponse::error(e.to_string()),
        };
        let response: ApiResponse<Link> = self
            .inner
            .api
            .create_link(token(session), &payload)
            .await
            .into();
        if let ApiResponse::Success { data } = &response {
            info!(slug = %data.slug, "link created");
            self.inner.store.upsert(data.clone());
        }
        response
    }

    pub async fn update_link(
        &self,
        session: Option<&Session>,
        id: &str,
        update: &UpdateLinkRequest,
    ) -> ApiResponse<Link> {
        if update.is_empty() {
            return ApiResponse::error("Nothing to update");
        }
        let mut update = update.clone();
        if let Some(destination) = update.destination_url.take() {
            match prepare_destination(&destination) {
                Ok(url) => update.destination_url = Some(url),
                Err(e) => return ApiResponse::error(e.to_string()),
            }
        }
        let response: ApiResponse<Link> = self
            .inner
            .api
            .update_link(token(session), id, &update)
            .await
            .into();
        if let ApiResponse::Success { data } = &response {
            self.inner.store.upsert(data.clone());
        }
        response
    }

    pub async fn delete_link(&self, session: Option<&Session>, id: &str) -> ApiResponse<()> {
        let response: ApiResponse<()> = self.inner.api.delete_link(token(session), id).await.into();
        if response.is_success() {
            info!(id, "link deleted");
            self.inner.store.remove(id);
        }
        response
    }

    // ── Analytics ────────────────────────────────────────────────

    pub async fn link_analytics(
        &self,
        session: Option<&Session>,
        id: &str,
    ) -> ApiResponse<AnalyticsResponse> {
        self.inner.api.link_analytics(token(session), id).await.into()
    }

    /// Per-link reports for the whole account. Combine them with
    /// [`crate::analytics::combined_stats`].
    pub async fn analytics_overview(
        &self,
        session: Option<&Session>,
    ) -> ApiResponse<Vec<AnalyticsResponse>> {
        self.inner.api.analytics_overview(token(session)).await.into()
    }

    // ── Metadata & QR ────────────────────────────────────────────

    /// Preview what enrichment would find for a destination.
    pub async fn fetch_metadata(&self, destination: &str) -> Result<UrlMetadata, CoreError> {
        let url = prepare_destination(destination)?;
        Ok(self.inner.metadata.fetch(&url).await)
    }

    /// QR image URL for `text` using the configured renderer.
    pub fn qr_code_url(&self, text: &str, size: u32) -> Result<Url, CoreError> {
        qr_code_url(&self.inner.config.qr_service, text, size)
    }
}
