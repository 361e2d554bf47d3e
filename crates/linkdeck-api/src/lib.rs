// linkdeck-api: Async Rust client for the link-shortening service REST API
//
// Every remote call funnels through `ApiClient`, which owns the `{ data }`
// envelope and the error mapping. `MetadataFetcher` is the one client that
// talks to arbitrary third-party pages instead of the service.

pub mod analytics;
pub mod auth;
pub mod client;
pub mod error;
pub mod links;
pub mod metadata;
pub mod models;
pub mod timestamp;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use metadata::{MetadataConfig, MetadataFetcher, UrlMetadata};
pub use models::{
    AnalyticsResponse, ClickEvent, CreateLinkPayload, Link, LinkStats, UpdateLinkRequest,
    UpdateProfileRequest, User, UtmBreakdown,
};
pub use transport::TransportConfig;
