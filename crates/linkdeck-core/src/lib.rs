//! Link-management layer between `linkdeck-api` and the CLI.
//!
//! - **[`Dashboard`]**: facade over one link service. Every network-facing
//!   operation answers with an [`ApiResponse`] and takes the caller's
//!   [`Session`] explicitly.
//!
//! - **Create pipeline**: [`validate`] normalizes and checks the
//!   destination, [`linkdeck_api::MetadataFetcher`] enriches it, and
//!   [`payload`] assembles the `POST /links` body with fallbacks.
//!
//! - **[`LinkStore`]** and [`view`]: the cached link list and the pure
//!   filter/sort functions that derive what gets shown.
//!
//! - [`analytics`] and [`qr`]: ranking helpers for click breakdowns and
//!   QR image URLs.

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod payload;
pub mod qr;
pub mod response;
pub mod session;
pub mod store;
pub mod validate;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use analytics::{AccountTotals, BreakdownEntry, StatsDimension};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use payload::{DEFAULT_DOMAIN, LinkOptions};
pub use response::ApiResponse;
pub use session::Session;
pub use store::LinkStore;
pub use validate::{is_valid_url, normalize_url};
pub use view::{LinkQuery, SortDirection};

// Re-export wire types so consumers rarely need `linkdeck-api` directly.
pub use linkdeck_api::{
    AnalyticsResponse, ClickEvent, CreateLinkPayload, Link, LinkStats, UpdateLinkRequest,
    UpdateProfileRequest, UrlMetadata, User, UtmBreakdown,
};
