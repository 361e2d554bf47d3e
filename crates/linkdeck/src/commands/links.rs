//! Link command handlers.

use linkdeck_core::analytics::account_totals;
use linkdeck_core::{
    CreateLinkPayload, Link, LinkOptions, LinkQuery, SortDirection, UpdateLinkRequest,
};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{LinksArgs, LinksCommand, OutputFormat, SortOrder};
use crate::commands::Context;
use crate::commands::util::{self, read_password, require_session, respond, spinner};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Short URL")]
    short_url: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Clicks")]
    clicks: u64,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Created")]
    created: String,
}

const DESTINATION_WIDTH: usize = 48;

impl From<&Link> for LinkRow {
    fn from(l: &Link) -> Self {
        let lock = if l.is_password_protected { " 🔒" } else { "" };
        Self {
            slug: format!("{}{lock}", l.slug),
            short_url: l.short_url.clone(),
            destination: truncate(&l.destination_url, DESTINATION_WIDTH),
            clicks: l.stats.total_clicks,
            tags: l.tags.join(", "),
            created: l.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map_or_else(|| "-".into(), str::to_owned)
}

fn detail(l: &Link, color: bool) -> String {
    let mut rows = vec![
        ("ID", l.id.clone()),
        ("Slug", l.slug.clone()),
        ("Short URL", l.short_url.clone()),
        ("Destination", l.destination_url.clone()),
        ("Title", or_dash(l.title.as_deref())),
        ("Description", or_dash(l.description.as_deref())),
        ("Favicon", or_dash(l.favicon.as_deref())),
        ("Tags", if l.tags.is_empty() { "-".into() } else { l.tags.join(", ") }),
        ("Protected", if l.is_password_protected { "yes" } else { "no" }.into()),
        ("Clicks", l.stats.total_clicks.to_string()),
        ("Created", l.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    ];
    if let Some(expires) = l.expires_at {
        rows.push(("Expires", expires.format("%Y-%m-%d %H:%M UTC").to_string()));
    }
    output::detail_block(&rows, color)
}

fn payload_detail(p: &CreateLinkPayload, color: bool) -> String {
    output::detail_block(
        &[
            ("Destination", p.destination_url.clone()),
            ("Domain", p.domain.clone()),
            ("Slug", or_dash(p.slug.as_deref())),
            ("Title", p.title.clone()),
            ("Description", p.description.clone()),
            ("Favicon", p.favicon.clone()),
            ("Tags", if p.tags.is_empty() { "-".into() } else { p.tags.join(", ") }),
            ("Protected", if p.is_password_protected { "yes" } else { "no" }.into()),
        ],
        color,
    )
}

fn print_link(link: &Link, ctx: &Context<'_>) -> Result<(), CliError> {
    let out = output::render_single(
        ctx.out.format,
        link,
        |l| detail(l, ctx.out.color),
        |l| l.short_url.clone(),
    )?;
    output::print_output(&out, ctx.out.quiet);
    Ok(())
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Desc => SortDirection::Desc,
            SortOrder::Asc => SortDirection::Asc,
        }
    }
}

/// Empty strings on the command line mean "not given".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Serialize)]
struct QrCode<'a> {
    slug: &'a str,
    short_url: &'a str,
    size: u32,
    qr_url: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: LinksArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let dashboard = ctx.dashboard;

    match args.command {
        LinksCommand::List {
            search,
            sort,
            limit,
        } => {
            require_session(ctx)?;
            respond(dashboard.refresh_links(ctx.session).await)?;

            let query = LinkQuery::new(search.unwrap_or_default(), sort.into());
            let mut links = dashboard.visible_links(&query);
            if let Some(limit) = limit {
                links.truncate(limit);
            }

            let out = output::render_list(
                ctx.out.format,
                &links,
                |l| LinkRow::from(l),
                |l| l.slug.clone(),
            )?;
            output::print_output(&out, ctx.out.quiet);
            if ctx.out.format == OutputFormat::Table && !links.is_empty() {
                let totals = account_totals(&links);
                output::print_output(
                    &format!("{} links, {} clicks", totals.links, totals.clicks),
                    ctx.out.quiet,
                );
            }
            Ok(())
        }

        LinksCommand::Get { link } => {
            require_session(ctx)?;
            let found = util::resolve_link(ctx, &link).await?;
            // The list endpoint may omit fields the detail endpoint fills in.
            let full = respond(dashboard.get_link(ctx.session, &found.id).await)?;
            print_link(&full, ctx)
        }

        LinksCommand::Create {
            url,
            slug,
            title,
            description,
            tags,
            protect,
            password_stdin,
            dry_run,
        } => {
            let password = if protect {
                Some(read_password("Link password: ", password_stdin)?)
            } else {
                None
            };
            let options = LinkOptions {
                custom_slug: non_empty(slug),
                title: non_empty(title),
                description: non_empty(description),
                tags,
                password_protected: protect,
                password,
            };

            if dry_run {
                let bar = spinner("Reading destination page...", ctx.out.quiet);
                let payload = dashboard.prepare_link(&url, &options).await;
                bar.finish_and_clear();

                let payload = payload?;
                let out = output::render_single(
                    ctx.out.format,
                    &payload,
                    |p| payload_detail(p, ctx.out.color),
                    |p| p.destination_url.clone(),
                )?;
                output::print_output(&out, ctx.out.quiet);
                return Ok(());
            }

            require_session(ctx)?;
            let bar = spinner("Shortening...", ctx.out.quiet);
            let response = dashboard.create_link(ctx.session, &url, &options).await;
            bar.finish_and_clear();

            let link = respond(response)?;
            output::status(&format!("Created {}", link.short_url), &ctx.out);
            print_link(&link, ctx)
        }

        LinksCommand::Update {
            link,
            url,
            slug,
            title,
            description,
            tags,
            protect,
            unprotect,
        } => {
            require_session(ctx)?;
            let target = util::resolve_link(ctx, &link).await?;

            let mut update = UpdateLinkRequest {
                destination_url: non_empty(url),
                slug: non_empty(slug),
                title,
                description,
                tags,
                ..UpdateLinkRequest::default()
            };
            if protect {
                update.is_password_protected = Some(true);
                update.password = Some(read_password("Link password: ", false)?);
            } else if unprotect {
                update.is_password_protected = Some(false);
            }

            let updated = respond(dashboard.update_link(ctx.session, &target.id, &update).await)?;
            output::status(&format!("Updated {}", updated.slug), &ctx.out);
            print_link(&updated, ctx)
        }

        LinksCommand::Delete { link } => {
            require_session(ctx)?;
            let target = util::resolve_link(ctx, &link).await?;

            let prompt = format!("Delete link '{}' ({})?", target.slug, target.destination_url);
            if !util::confirm(&prompt, ctx.global.yes)? {
                return Ok(());
            }

            respond(dashboard.delete_link(ctx.session, &target.id).await)?;
            output::status(&format!("Deleted {}", target.slug), &ctx.out);
            Ok(())
        }

        LinksCommand::Qr { link, size } => {
            require_session(ctx)?;
            let target = util::resolve_link(ctx, &link).await?;

            let qr = QrCode {
                slug: &target.slug,
                short_url: &target.short_url,
                size,
                qr_url: dashboard.qr_code_url(&target.short_url, size)?.to_string(),
            };
            let out = output::render_single(
                ctx.out.format,
                &qr,
                |q| q.qr_url.clone(),
                |q| q.qr_url.clone(),
            )?;
            output::print_output(&out, ctx.out.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("https://a.com", 48), "https://a.com");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn blank_overrides_are_dropped() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".into()));
    }
}
