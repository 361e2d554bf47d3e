#![allow(clippy::unwrap_used)]
// Integration tests for `MetadataFetcher` using wiremock.

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use linkdeck_api::{MetadataConfig, MetadataFetcher, UrlMetadata};

// ── Helpers ─────────────────────────────────────────────────────────

fn fetcher() -> MetadataFetcher {
    MetadataFetcher::new(&MetadataConfig::default()).unwrap()
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.to_owned())
}

// ── Extraction ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_extracts_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(html(
            r#"<html><head>
                <title>A Great Article</title>
                <meta name="description" content="Everything you need">
                <link rel="icon" href="/img/icon.png">
            </head></html>"#,
        ))
        .mount(&server)
        .await;

    let meta = fetcher().fetch(&format!("{}/article", server.uri())).await;

    assert_eq!(meta.title, "A Great Article");
    assert_eq!(meta.description, "Everything you need");
    assert_eq!(meta.favicon, format!("{}/img/icon.png", server.uri()));
}

#[tokio::test]
async fn test_fetch_sends_identifying_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "linkdeck-test/2.0"))
        .respond_with(html("<title>ok</title>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = MetadataConfig {
        user_agent: "linkdeck-test/2.0".into(),
        ..MetadataConfig::default()
    };
    let meta = MetadataFetcher::new(&config)
        .unwrap()
        .fetch(&format!("{}/", server.uri()))
        .await;
    assert_eq!(meta.title, "ok");
}

#[tokio::test]
async fn test_page_without_icon_gets_origin_favicon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deep/page"))
        .respond_with(html("<html><head><title>x</title></head></html>"))
        .mount(&server)
        .await;

    let meta = fetcher().fetch(&format!("{}/deep/page", server.uri())).await;
    assert_eq!(meta.favicon, format!("{}/favicon.ico", server.uri()));
    assert_eq!(meta.description, "");
}

#[tokio::test]
async fn test_missing_content_type_is_still_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<title>Raw</title>".to_vec()))
        .mount(&server)
        .await;

    let meta = fetcher().fetch(&format!("{}/raw", server.uri())).await;
    assert_eq!(meta.title, "Raw");
}

// ── Failures collapse to empty metadata ─────────────────────────────

#[tokio::test]
async fn test_server_error_yields_empty_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<title>Error page</title>"))
        .mount(&server)
        .await;

    let meta = fetcher().fetch(&server.uri()).await;
    assert_eq!(meta, UrlMetadata::default());
}

#[tokio::test]
async fn test_non_markup_yields_empty_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .mount(&server)
        .await;

    let meta = fetcher().fetch(&server.uri()).await;
    assert!(meta.is_empty());
}

#[tokio::test]
async fn test_slow_page_times_out_to_empty_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("<title>late</title>").set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = MetadataConfig {
        timeout: Duration::from_millis(50),
        ..MetadataConfig::default()
    };
    let meta = MetadataFetcher::new(&config)
        .unwrap()
        .fetch(&server.uri())
        .await;
    assert!(meta.is_empty());
}

#[tokio::test]
async fn test_unreachable_and_invalid_urls_yield_empty_metadata() {
    let f = fetcher();
    assert!(f.fetch("http://127.0.0.1:1/").await.is_empty());
    assert!(f.fetch("not a url").await.is_empty());
}
