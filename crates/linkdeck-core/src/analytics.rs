// ── Click analytics helpers ──
//
// The service does the per-link counting. These reshape its breakdowns
// into ranked rows and fold per-link reports into account totals.

use std::collections::BTreeMap;

use linkdeck_api::{AnalyticsResponse, Link, LinkStats};
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// One of the per-link breakdown maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatsDimension {
    Referrers,
    Countries,
    Devices,
    Browsers,
}

impl StatsDimension {
    /// The matching breakdown map of `stats`.
    pub fn breakdown(self, stats: &LinkStats) -> &BTreeMap<String, u64> {
        match self {
            Self::Referrers => &stats.referrers,
            Self::Countries => &stats.countries,
            Self::Devices => &stats.devices,
            Self::Browsers => &stats.browsers,
        }
    }

    /// Singular column heading.
    pub fn label(self) -> &'static str {
        match self {
            Self::Referrers => "Referrer",
            Self::Countries => "Country",
            Self::Devices => "Device",
            Self::Browsers => "Browser",
        }
    }
}

/// A ranked breakdown row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub key: String,
    pub clicks: u64,
    /// Percentage of the breakdown's total.
    pub share: f64,
}

/// Percentage `count` is of `total`; `0.0` for an empty total.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Entries by count descending, ties by key, at most `n` of them.
///
/// Shares are relative to the whole breakdown, not just the kept rows.
pub fn top_entries(breakdown: &BTreeMap<String, u64>, n: usize) -> Vec<BreakdownEntry> {
    let total = breakdown.values().copied().fold(0u64, u64::saturating_add);
    let mut entries: Vec<(&String, &u64)> = breakdown.iter().collect();
    // BTreeMap iteration is already key-ordered; a stable sort keeps ties that way.
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .take(n)
        .map(|(key, &clicks)| BreakdownEntry {
            key: key.clone(),
            clicks,
            share: share(clicks, total),
        })
        .collect()
}

/// Link count and summed clicks over a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountTotals {
    pub links: usize,
    pub clicks: u64,
}

pub fn account_totals(links: &[Link]) -> AccountTotals {
    AccountTotals {
        links: links.len(),
        clicks: links
            .iter()
            .map(|l| l.stats.total_clicks)
            .fold(0u64, u64::saturating_add),
    }
}

/// Totals over the per-link reports of `GET /analytics/links`.
pub fn report_totals(reports: &[AnalyticsResponse]) -> AccountTotals {
    AccountTotals {
        links: reports.len(),
        clicks: reports
            .iter()
            .map(|r| r.stats.total_clicks)
            .fold(0u64, u64::saturating_add),
    }
}

/// Account-wide statistics: breakdowns summed key by key, unique counts
/// taken from the merged breakdowns.
pub fn combined_stats(reports: &[AnalyticsResponse]) -> LinkStats {
    let mut combined = LinkStats::default();
    for report in reports {
        let stats = &report.stats;
        combined.total_clicks = combined.total_clicks.saturating_add(stats.total_clicks);
        merge_counts(&mut combined.referrers, &stats.referrers);
        merge_counts(&mut combined.countries, &stats.countries);
        merge_counts(&mut combined.devices, &stats.devices);
        merge_counts(&mut combined.browsers, &stats.browsers);
    }
    combined.unique_countries = distinct(&combined.countries);
    combined.unique_devices = distinct(&combined.devices);
    combined.unique_browsers = distinct(&combined.browsers);
    combined
}

fn merge_counts(into: &mut BTreeMap<String, u64>, from: &BTreeMap<String, u64>) {
    for (key, &count) in from {
        let slot = into.entry(key.clone()).or_default();
        *slot = slot.saturating_add(count);
    }
}

fn distinct(breakdown: &BTreeMap<String, u64>) -> u64 {
    u64::try_from(breakdown.len()).unwrap_or(u64::MAX)
}
