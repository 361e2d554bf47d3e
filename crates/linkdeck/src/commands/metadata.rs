//! `metadata <url>`: preview what link enrichment would pick up.

use linkdeck_core::UrlMetadata;

use crate::cli::MetadataArgs;
use crate::commands::Context;
use crate::commands::util::spinner;
use crate::error::CliError;
use crate::output;

fn detail(m: &UrlMetadata, color: bool) -> String {
    let show = |v: &str| {
        if v.is_empty() {
            "-".to_owned()
        } else {
            v.to_owned()
        }
    };
    output::detail_block(
        &[
            ("Title", show(&m.title)),
            ("Description", show(&m.description)),
            ("Favicon", show(&m.favicon)),
        ],
        color,
    )
}

pub async fn handle(args: MetadataArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let bar = spinner("Reading page...", ctx.out.quiet);
    let metadata = ctx.dashboard.fetch_metadata(&args.url).await;
    bar.finish_and_clear();

    let metadata = metadata?;
    if metadata.is_empty() {
        tracing::info!(url = %args.url, "no metadata found; links will use fallback values");
    }

    let out = output::render_single(
        ctx.out.format,
        &metadata,
        |m| detail(m, ctx.out.color),
        |m| m.title.clone(),
    )?;
    output::print_output(&out, ctx.out.quiet);
    Ok(())
}
