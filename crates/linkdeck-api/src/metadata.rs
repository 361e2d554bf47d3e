// Destination-page metadata enrichment
//
// Fetches the page a new link points at and scrapes its title,
// description, and favicon. This is best-effort: every failure collapses
// into empty metadata and link creation carries on without it.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Timeout for the destination-page fetch.
pub const DEFAULT_METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Identifying user agent sent to destination pages.
pub const METADATA_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; linkdeck-bot/",
    env!("CARGO_PKG_VERSION"),
    "; +https://github.com/linkdeck/linkdeck)"
);

/// Favicon path assumed when a page declares no icon.
pub const FALLBACK_FAVICON_PATH: &str = "/favicon.ico";

/// Scraped page metadata. Empty strings mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMetadata {
    pub title: String,
    pub description: String,
    pub favicon: String,
}

impl UrlMetadata {
    /// `true` when nothing could be extracted (including failed fetches).
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.favicon.is_empty()
    }
}

/// Tuning for the metadata fetcher.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_METADATA_TIMEOUT,
            user_agent: METADATA_USER_AGENT.to_owned(),
        }
    }
}

/// Fetches destination pages for link enrichment.
///
/// One GET per [`fetch`](Self::fetch), no retries and no caching: asking
/// twice for the same URL hits the network twice.
#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    http: reqwest::Client,
}

impl MetadataFetcher {
    pub fn new(config: &MetadataConfig) -> Result<Self, Error> {
        let transport = TransportConfig {
            timeout: config.timeout,
            user_agent: config.user_agent.clone(),
            cookie_store: false,
            max_redirects: 5,
        };
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        let http = transport.build_client_with_headers(headers)?;
        Ok(Self { http })
    }

    /// Wrap an existing `reqwest::Client` (caller owns timeout/user agent).
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch and scrape `url`. Never fails: any error yields
    /// [`UrlMetadata::default()`].
    pub async fn fetch(&self, url: &str) -> UrlMetadata {
        match self.try_fetch(url).await {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(url, error = %e, "metadata fetch failed, continuing without it");
                UrlMetadata::default()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<UrlMetadata, Error> {
        let page_url = Url::parse(url)?;
        debug!("GET {page_url} (metadata)");

        let resp = self.http.get(page_url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: format!("destination answered {status}"),
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        if let Some(ct) = content_type.filter(|ct| !is_markup(ct)) {
            return Err(Error::UnsupportedContentType { content_type: ct });
        }

        let body = resp.text().await?;
        parse_metadata(&page_url, &body)
    }
}

/// Textual content types worth handing to the HTML parser.
fn is_markup(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    essence.starts_with("text/")
        || essence == "application/xhtml+xml"
        || essence == "application/xml"
}

/// Extract metadata from a page body fetched from `page_url`.
///
/// Fails only when a relative favicon cannot be resolved against the
/// page's origin.
pub fn parse_metadata(page_url: &Url, html: &str) -> Result<UrlMetadata, Error> {
    let document = Html::parse_document(html);

    let title = select_text(&document, "title").unwrap_or_default();

    let description = select_attr(&document, r#"meta[name="description"]"#, "content")
        .or_else(|| select_attr(&document, r#"meta[property="og:description"]"#, "content"))
        .unwrap_or_default();

    let favicon_ref = select_attr(&document, r#"link[rel="icon"]"#, "href")
        .or_else(|| select_attr(&document, r#"link[rel="shortcut icon"]"#, "href"))
        .unwrap_or_else(|| FALLBACK_FAVICON_PATH.to_owned());

    let favicon = resolve_favicon(page_url, &favicon_ref)?;

    Ok(UrlMetadata {
        title,
        description,
        favicon,
    })
}

/// Absolute references are kept as-is; anything without a scheme is
/// joined onto the page's origin.
pub fn resolve_favicon(page_url: &Url, reference: &str) -> Result<String, Error> {
    if Url::parse(reference).is_ok() {
        return Ok(reference.to_owned());
    }
    let origin = Url::parse(&page_url.origin().ascii_serialization())?;
    Ok(origin.join(reference)?.to_string())
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let element = document.select(&sel).next()?;
    let text = element.text().collect::<String>().trim().to_owned();
    (!text.is_empty()).then_some(text)
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_owned)
}
