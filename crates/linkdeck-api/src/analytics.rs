// Analytics endpoints
//
// Aggregation happens server-side; these only read the results.

use secrecy::SecretString;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::AnalyticsResponse;

impl ApiClient {
    /// Click statistics for a single link.
    ///
    /// `GET /analytics/links/:id`
    pub async fn link_analytics(
        &self,
        token: Option<&SecretString>,
        id: &str,
    ) -> Result<AnalyticsResponse, Error> {
        self.get(&["analytics", "links", id], token).await
    }

    /// One report per link owned by the account. Entries carry no link id;
    /// account totals are left to the caller.
    ///
    /// `GET /analytics/links`
    pub async fn analytics_overview(
        &self,
        token: Option<&SecretString>,
    ) -> Result<Vec<AnalyticsResponse>, Error> {
        self.get(&["analytics", "links"], token).await
    }
}
