// ── Runtime dashboard configuration ──
//
// Describes which service to talk to and how. Built by the CLI from the
// config file and flags; core never reads config files itself.

use std::time::Duration;

use linkdeck_api::metadata::{DEFAULT_METADATA_TIMEOUT, METADATA_USER_AGENT};
use linkdeck_api::transport::DEFAULT_TIMEOUT;
use linkdeck_api::{MetadataConfig, TransportConfig};
use url::Url;

use crate::payload::DEFAULT_DOMAIN;
use crate::qr::DEFAULT_QR_SERVICE;

/// Configuration for a single link service.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Service base URL (e.g. `https://api.lnk.example`).
    pub api_url: Url,
    /// Domain attached to new short links.
    pub domain: String,
    /// Timeout for service calls.
    pub timeout: Duration,
    /// Timeout for the destination-page metadata fetch.
    pub metadata_timeout: Duration,
    /// User agent sent to destination pages.
    pub metadata_user_agent: String,
    /// QR rendering endpoint.
    pub qr_service: String,
}

impl DashboardConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            domain: DEFAULT_DOMAIN.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            metadata_timeout: DEFAULT_METADATA_TIMEOUT,
            metadata_user_agent: METADATA_USER_AGENT.to_owned(),
            qr_service: DEFAULT_QR_SERVICE.to_owned(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(self.timeout)
    }

    pub(crate) fn metadata(&self) -> MetadataConfig {
        MetadataConfig {
            timeout: self.metadata_timeout,
            user_agent: self.metadata_user_agent.clone(),
        }
    }
}
