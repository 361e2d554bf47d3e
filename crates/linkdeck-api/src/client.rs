// Link service HTTP client
//
// The single chokepoint for every call to the service: URL construction,
// bearer auth, the `{ data }` envelope, and error mapping. Endpoint
// modules (auth, links, analytics) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, FALLBACK_HTTP_MESSAGE};
use crate::transport::TransportConfig;

// ── Envelope shapes ──────────────────────────────────────────────────

/// Success body: `{ "data": ... }`.
#[derive(serde::Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body. The service uses `message`; some middlewares answer with
/// `error` instead.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the link service REST API.
///
/// The session token is passed explicitly on each call rather than stored
/// in the client, so one client serves both anonymous (login/register) and
/// authenticated requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and make sure relative joins land under it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw.trim())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// The service base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL. Each segment is
    /// percent-encoded, so ids and slugs can never escape their position.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn builder(&self, method: Method, url: Url, token: Option<&SecretString>) -> reqwest::RequestBuilder {
        let req = self.http.request(method, url);
        match token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret())),
            None => req,
        }
    }

    /// Send a request and unwrap the `{ data }` envelope.
    pub async fn request<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&SecretString>,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!(authenticated = token.is_some(), "{method} {url}");

        let mut req = self.builder(method, url, token);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    /// Send a request whose success body is irrelevant.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&SecretString>,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!(authenticated = token.is_some(), "{method} {url}");

        let mut req = self.builder(method, url, token);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&SecretString>,
    ) -> Result<T, Error> {
        self.request::<T, ()>(Method::GET, segments, token, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        segments: &[&str],
        token: Option<&SecretString>,
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::POST, segments, token, Some(body)).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        segments: &[&str],
        token: Option<&SecretString>,
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::PATCH, segments, token, Some(body)).await
    }

    pub(crate) async fn delete(
        &self,
        segments: &[&str],
        token: Option<&SecretString>,
    ) -> Result<(), Error> {
        self.request_empty::<()>(Method::DELETE, segments, token, None)
            .await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_HTTP_MESSAGE.to_owned());

        debug!(status = status.as_u16(), %message, "request rejected");
        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}
