//! Analytics command handlers.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use linkdeck_core::analytics::{combined_stats, report_totals, top_entries};
use linkdeck_core::{AnalyticsResponse, BreakdownEntry, ClickEvent, Link, StatsDimension};
use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::{AnalyticsArgs, AnalyticsCommand, Dimension};
use crate::commands::Context;
use crate::commands::util::{self, require_session, respond};
use crate::error::CliError;
use crate::output;

const BAR_WIDTH: usize = 20;

impl From<Dimension> for StatsDimension {
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Referrers => StatsDimension::Referrers,
            Dimension::Countries => StatsDimension::Countries,
            Dimension::Devices => StatsDimension::Devices,
            Dimension::Browsers => StatsDimension::Browsers,
        }
    }
}

// ── Rendered shapes ─────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct TopLinkRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Clicks")]
    clicks: u64,
}

#[derive(Tabled)]
struct ClickRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Browser")]
    browser: String,
    #[tabled(rename = "Referrer")]
    referrer: String,
}

impl From<&ClickEvent> for ClickRow {
    fn from(c: &ClickEvent) -> Self {
        Self {
            when: c.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            country: dash_if_empty(&c.country),
            device: dash_if_empty(&c.device),
            browser: dash_if_empty(&c.browser),
            referrer: dash_if_empty(&c.referrer),
        }
    }
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() { "-".into() } else { value.to_owned() }
}

#[derive(Serialize)]
struct LinkReport {
    slug: String,
    total_clicks: u64,
    unique_countries: u64,
    unique_devices: u64,
    unique_browsers: u64,
    breakdowns: BTreeMap<String, Vec<BreakdownEntry>>,
    utm: BTreeMap<String, Vec<BreakdownEntry>>,
    recent_clicks: Vec<ClickEvent>,
}

#[derive(Serialize)]
struct OverviewReport {
    total_links: usize,
    total_clicks: u64,
    top_links: Vec<TopLinkRow>,
    breakdowns: BTreeMap<String, Vec<BreakdownEntry>>,
}

/// Campaign breakdowns keyed `source`, `medium`, `campaign`. Empty ones
/// are left out.
fn utm_entries(report: &AnalyticsResponse, top: usize) -> BTreeMap<String, Vec<BreakdownEntry>> {
    let utm = &report.utm_breakdown;
    [
        ("source", &utm.source),
        ("medium", &utm.medium),
        ("campaign", &utm.campaign),
    ]
    .into_iter()
    .filter(|(_, map)| !map.is_empty())
    .map(|(name, map)| (name.to_owned(), top_entries(map, top)))
    .collect()
}

/// Newest clicks first, at most `n`.
fn recent_clicks(clicks: &[ClickEvent], n: usize) -> Vec<ClickEvent> {
    let mut recent = clicks.to_vec();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(n);
    recent
}

/// Cached links by clicks descending, at most `n`.
fn top_links(links: &[Link], n: usize) -> Vec<TopLinkRow> {
    let mut ranked: Vec<&Link> = links.iter().collect();
    ranked.sort_by(|a, b| b.stats.total_clicks.cmp(&a.stats.total_clicks));
    ranked
        .into_iter()
        .take(n)
        .map(|l| TopLinkRow {
            slug: l.slug.clone(),
            clicks: l.stats.total_clicks,
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn bar(share: f64) -> String {
    let filled = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}

fn breakdown_table(label: &str, entries: &[BreakdownEntry]) -> String {
    if entries.is_empty() {
        return "  (no clicks yet)".into();
    }
    let mut builder = Builder::default();
    builder.push_record([
        label.to_owned(),
        "Clicks".to_owned(),
        "Share".to_owned(),
        String::new(),
    ]);
    for e in entries {
        builder.push_record([
            e.key.clone(),
            e.clicks.to_string(),
            format!("{:.1}%", e.share),
            bar(e.share),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn selected_dimensions(only: Option<Dimension>) -> Vec<StatsDimension> {
    match only {
        Some(d) => vec![d.into()],
        None => StatsDimension::iter().collect(),
    }
}

fn render_breakdowns(
    breakdowns: &BTreeMap<String, Vec<BreakdownEntry>>,
    dimensions: &[StatsDimension],
    color: bool,
) -> String {
    let mut out = String::new();
    for dim in dimensions {
        let entries = breakdowns
            .get(&dim.to_string())
            .map_or(&[][..], Vec::as_slice);
        let _ = writeln!(out, "\n{}", output::heading(&format!("Top {dim}"), color));
        let _ = writeln!(out, "{}", breakdown_table(dim.label(), entries));
    }
    out.trim_end().to_owned()
}

fn render_utm(utm: &BTreeMap<String, Vec<BreakdownEntry>>, color: bool) -> String {
    let mut out = String::new();
    for (name, entries) in utm {
        let _ = writeln!(out, "\n{}", output::heading(&format!("UTM {name}"), color));
        let _ = writeln!(out, "{}", breakdown_table(name, entries));
    }
    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AnalyticsArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let dashboard = ctx.dashboard;
    require_session(ctx)?;

    match args.command {
        AnalyticsCommand::Link {
            link,
            dimension,
            top,
        } => {
            let target = util::resolve_link(ctx, &link).await?;
            let analytics = respond(dashboard.link_analytics(ctx.session, &target.id).await)?;
            let stats = &analytics.stats;

            let dimensions = selected_dimensions(dimension);
            let breakdowns = dimensions
                .iter()
                .map(|d| (d.to_string(), top_entries(d.breakdown(stats), top)))
                .collect();
            let report = LinkReport {
                slug: target.slug,
                total_clicks: stats.total_clicks,
                unique_countries: stats.unique_countries,
                unique_devices: stats.unique_devices,
                unique_browsers: stats.unique_browsers,
                breakdowns,
                utm: utm_entries(&analytics, top),
                recent_clicks: recent_clicks(&analytics.clicks, top),
            };

            let color = ctx.out.color;
            let out = output::render_single(
                ctx.out.format,
                &report,
                |r| {
                    let summary = output::detail_block(
                        &[
                            ("Link", r.slug.clone()),
                            ("Clicks", r.total_clicks.to_string()),
                            ("Countries", r.unique_countries.to_string()),
                            ("Devices", r.unique_devices.to_string()),
                            ("Browsers", r.unique_browsers.to_string()),
                        ],
                        color,
                    );
                    let mut text = format!(
                        "{summary}\n{}",
                        render_breakdowns(&r.breakdowns, &dimensions, color)
                    );
                    if !r.utm.is_empty() {
                        let _ = write!(text, "\n{}", render_utm(&r.utm, color));
                    }
                    if !r.recent_clicks.is_empty() {
                        let rows: Vec<ClickRow> =
                            r.recent_clicks.iter().map(|c| ClickRow::from(c)).collect();
                        let _ = write!(
                            text,
                            "\n\n{}\n{}",
                            output::heading("Recent clicks", color),
                            output::render_table(&rows)
                        );
                    }
                    text
                },
                |r| r.total_clicks.to_string(),
            )?;
            output::print_output(&out, ctx.out.quiet);
            Ok(())
        }

        AnalyticsCommand::Overview { top } => {
            let reports = respond(dashboard.analytics_overview(ctx.session).await)?;
            let links = respond(dashboard.refresh_links(ctx.session).await)?;

            let totals = report_totals(&reports);
            let combined = combined_stats(&reports);
            let dimensions: Vec<StatsDimension> = StatsDimension::iter().collect();
            let breakdowns = dimensions
                .iter()
                .map(|d| (d.to_string(), top_entries(d.breakdown(&combined), top)))
                .collect();
            let report = OverviewReport {
                total_links: totals.links,
                total_clicks: totals.clicks,
                top_links: top_links(&links, top),
                breakdowns,
            };

            let color = ctx.out.color;
            let out = output::render_single(
                ctx.out.format,
                &report,
                |r| {
                    let summary = output::detail_block(
                        &[
                            ("Links", r.total_links.to_string()),
                            ("Clicks", r.total_clicks.to_string()),
                        ],
                        color,
                    );
                    format!(
                        "{summary}\n\n{}\n{}\n{}",
                        output::heading("Top links", color),
                        output::render_table(&r.top_links),
                        render_breakdowns(&r.breakdowns, &dimensions, color)
                    )
                },
                |r| r.total_clicks.to_string(),
            )?;
            output::print_output(&out, ctx.out.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(50.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(100.0).chars().count(), BAR_WIDTH);
    }

    fn click(at: &str, country: &str) -> ClickEvent {
        serde_json::from_value(serde_json::json!({ "timestamp": at, "country": country }))
            .unwrap()
    }

    #[test]
    fn recent_clicks_newest_first() {
        let clicks = [
            click("2024-01-01T00:00:00Z", "NL"),
            click("2024-03-01T00:00:00Z", "DE"),
            click("2024-02-01T00:00:00Z", "FR"),
        ];
        let recent = recent_clicks(&clicks, 2);
        let countries: Vec<_> = recent.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(countries, vec!["DE", "FR"]);
    }

    #[test]
    fn utm_skips_empty_parameters() {
        let mut report = AnalyticsResponse::default();
        report.utm_breakdown.campaign.insert("spring".into(), 4);
        let utm = utm_entries(&report, 5);
        assert_eq!(utm.keys().collect::<Vec<_>>(), vec!["campaign"]);
        assert_eq!(utm["campaign"][0].clicks, 4);
    }

    #[test]
    fn all_dimensions_by_default() {
        assert_eq!(selected_dimensions(None).len(), 4);
        assert_eq!(
            selected_dimensions(Some(Dimension::Devices)),
            vec![StatsDimension::Devices]
        );
    }
}
