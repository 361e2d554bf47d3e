// ── Create-link payload assembly ──
//
// Combines a validated destination, the user's options, and scraped page
// metadata into the body for `POST /links`. Empty strings count as
// "not provided" at every step, so a blank override falls through to the
// scraped value and a blank scraped value falls through to the default.

use linkdeck_api::{CreateLinkPayload, MetadataFetcher, UrlMetadata};
use tracing::debug;

/// Domain attached to every new link unless a profile overrides it.
pub const DEFAULT_DOMAIN: &str = "lnk.example";

/// Title used when neither the user nor the page supplies one.
pub const DEFAULT_TITLE: &str = "Link";

/// Description used when neither the user nor the page supplies one.
pub const DEFAULT_DESCRIPTION: &str = "Shortened link";

/// Favicon used when the page yields none.
pub const DEFAULT_FAVICON: &str = "/favicon.ico";

/// User-supplied options for a new link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
    pub custom_slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub password_protected: bool,
    pub password: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Build the create body from already-fetched metadata. Pure.
pub fn compose_payload(
    destination_url: &str,
    domain: &str,
    options: &LinkOptions,
    metadata: &UrlMetadata,
) -> CreateLinkPayload {
    let title = non_empty(options.title.as_deref())
        .or_else(|| non_empty(Some(&metadata.title)))
        .unwrap_or(DEFAULT_TITLE);
    let description = non_empty(options.description.as_deref())
        .or_else(|| non_empty(Some(&metadata.description)))
        .unwrap_or(DEFAULT_DESCRIPTION);
    let favicon = non_empty(Some(&metadata.favicon)).unwrap_or(DEFAULT_FAVICON);

    let password = if options.password_protected {
        Some(options.password.clone().unwrap_or_default())
    } else {
        None
    };

    CreateLinkPayload {
        destination_url: destination_url.to_owned(),
        domain: domain.to_owned(),
        slug: non_empty(options.custom_slug.as_deref()).map(str::to_owned),
        title: title.to_owned(),
        description: description.to_owned(),
        favicon: favicon.to_owned(),
        tags: options.tags.clone(),
        expires_at: None,
        is_password_protected: options.password_protected,
        password,
    }
}

/// Fetch the destination's metadata, then compose the payload.
///
/// Never fails: an unreachable or odd destination only means defaults.
pub async fn build_payload(
    fetcher: &MetadataFetcher,
    destination_url: &str,
    domain: &str,
    options: &LinkOptions,
) -> CreateLinkPayload {
    let metadata = fetcher.fetch(destination_url).await;
    debug!(
        destination = destination_url,
        enriched = !metadata.is_empty(),
        "building create-link payload"
    );
    compose_payload(destination_url, domain, options, &metadata)
}
