#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use linkdeck_api::{
    ApiClient, CreateLinkPayload, Error, TransportConfig, UpdateLinkRequest,
    UpdateProfileRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    (server, client)
}

fn token() -> SecretString {
    SecretString::from("tok-123".to_string())
}

fn link_json(id: &str, slug: &str, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "slug": slug,
        "destinationUrl": format!("https://{slug}.example.com"),
        "shortUrl": format!("https://lnk.example/{slug}"),
        "title": "Example",
        "tags": ["docs"],
        "passwordProtected": false,
        "createdAt": created_at,
        "stats": { "totalClicks": 4, "countryBreakdown": { "Norway": 3, "Chile": 1 } }
    })
}

// ── Auth tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "_id": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "token": "tok-abc"
            }
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("hunter2".to_string());
    let user = client.login("ada@example.com", &secret).await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.token.as_deref(), Some("tok-abc"));
}

#[tokio::test]
async fn test_login_rejected_surfaces_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let secret = SecretString::from("nope".to_string());
    let err = client.login("ada@example.com", &secret).await.unwrap_err();

    assert!(err.is_auth_expired());
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_update_profile_sends_only_changed_fields() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "name": "Grace" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "u1", "name": "Grace", "email": "ada@example.com" }
        })))
        .mount(&server)
        .await;

    let update = UpdateProfileRequest {
        name: Some("Grace".into()),
        ..UpdateProfileRequest::default()
    };
    let user = client.update_me(Some(&token()), &update).await.unwrap();
    assert_eq!(user.name, "Grace");
}

// ── Link tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_links_sends_bearer_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/links"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                link_json("1", "a", "2024-01-01T00:00:00Z"),
                link_json("2", "b", "2024-03-01T00:00:00Z"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let links = client.list_links(Some(&token())).await.unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].slug, "a");
    assert_eq!(links[0].stats.total_clicks, 4);
    assert_eq!(links[0].stats.countries.get("Norway"), Some(&3));
    assert_eq!(links[1].tags, vec!["docs".to_string()]);
}

#[tokio::test]
async fn test_create_link_posts_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/links"))
        .and(body_json(json!({
            "destinationUrl": "https://example.com",
            "domain": "lnk.example",
            "title": "Link",
            "description": "Shortened link",
            "favicon": "/favicon.ico",
            "tags": [],
            "passwordProtected": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": link_json("9", "xyz", "2024-05-05T12:00:00Z")
        })))
        .mount(&server)
        .await;

    let payload = CreateLinkPayload {
        destination_url: "https://example.com".into(),
        domain: "lnk.example".into(),
        slug: None,
        title: "Link".into(),
        description: "Shortened link".into(),
        favicon: "/favicon.ico".into(),
        tags: vec![],
        expires_at: None,
        is_password_protected: false,
        password: None,
    };
    let link = client.create_link(Some(&token()), &payload).await.unwrap();
    assert_eq!(link.id, "9");
    assert_eq!(link.slug, "xyz");
}

#[tokio::test]
async fn test_update_link_targets_id() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/links/42"))
        .and(body_json(json!({ "title": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": link_json("42", "renamed", "2024-01-01T00:00:00Z")
        })))
        .mount(&server)
        .await;

    let update = UpdateLinkRequest {
        title: Some("Renamed".into()),
        ..UpdateLinkRequest::default()
    };
    let link = client
        .update_link(Some(&token()), "42", &update)
        .await
        .unwrap();
    assert_eq!(link.slug, "renamed");
}

#[tokio::test]
async fn test_delete_link_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/links/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_link(Some(&token()), "42").await.unwrap();
}

#[tokio::test]
async fn test_missing_link_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/links/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Link not found" })))
        .mount(&server)
        .await;

    let err = client.get_link(Some(&token()), "missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Link not found");
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_error_without_message_uses_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/links"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_links(Some(&token())).await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 500, .. }));
    assert_eq!(err.user_message(), "Request failed");
}

#[tokio::test]
async fn test_malformed_success_body_is_invalid_response() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "1", "destinationUrl": "https://a.com" }]
        })))
        .mount(&server)
        .await;

    let err = client.list_links(Some(&token())).await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
    assert!(err.user_message().starts_with("Invalid response from server"));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    let client = ApiClient::new("http://127.0.0.1:1", &TransportConfig::default()).unwrap();

    let err = client.list_links(None).await.unwrap_err();
    assert!(err.is_connection(), "expected connection error, got: {err:?}");
    assert!(!err.user_message().is_empty());
}

// ── Analytics tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_link_analytics_reads_breakdowns() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/analytics/links/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "totalClicks": 10,
                "uniqueCountries": 2,
                "uniqueDevices": 1,
                "uniqueBrowsers": 2,
                "referrerBreakdown": {},
                "countryBreakdown": { "Norway": 6, "Chile": 4 },
                "deviceBreakdown": { "desktop": 10 },
                "browserBreakdown": { "Firefox": 7, "Safari": 3 },
                "utmBreakdown": {
                    "source": { "newsletter": 4 },
                    "medium": { "email": 4 },
                    "campaign": {}
                },
                "clicks": [{
                    "timestamp": "2024-05-01T08:30:00.000Z",
                    "ip": "198.51.100.7",
                    "country": "Norway",
                    "city": "Oslo",
                    "device": "desktop",
                    "browser": "Firefox",
                    "os": "Linux",
                    "referrer": "direct",
                    "utmSource": "newsletter",
                    "utmMedium": "email"
                }]
            }
        })))
        .mount(&server)
        .await;

    let report = client.link_analytics(Some(&token()), "42").await.unwrap();
    assert_eq!(report.stats.total_clicks, 10);
    assert_eq!(report.stats.unique_countries, 2);
    assert_eq!(report.stats.countries.get("Norway"), Some(&6));
    assert_eq!(report.stats.browsers.get("Firefox"), Some(&7));
    assert!(report.stats.referrers.is_empty());
    assert_eq!(report.utm_breakdown.medium.get("email"), Some(&4));
    assert_eq!(report.clicks.len(), 1);
    assert_eq!(report.clicks[0].city, "Oslo");
    assert_eq!(report.clicks[0].utm_campaign, None);
}

#[tokio::test]
async fn test_analytics_overview() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/analytics/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "totalClicks": 4,
                    "countryBreakdown": { "Norway": 4 },
                    "utmBreakdown": { "source": {}, "medium": {}, "campaign": {} },
                    "clicks": []
                },
                {
                    "totalClicks": 1,
                    "countryBreakdown": { "Chile": 1 }
                }
            ]
        })))
        .mount(&server)
        .await;

    let reports = client.analytics_overview(Some(&token())).await.unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].stats.total_clicks, 4);
    assert_eq!(reports[1].stats.countries.get("Chile"), Some(&1));
    assert!(reports[1].clicks.is_empty());
}

#[tokio::test]
async fn test_analytics_overview_rejects_object_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/analytics/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "totalLinks": 2, "totalClicks": 5 }
        })))
        .mount(&server)
        .await;

    let result = client.analytics_overview(Some(&token())).await;
    assert!(result.is_err());
}
