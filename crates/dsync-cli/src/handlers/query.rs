//! `query` handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::render_listing;

use super::parse_dataset;

/// List the repository's files with their sizes.
pub async fn execute(ctx: &CliContext, repo: &str) -> Result<(), CliError> {
    let dataset = parse_dataset(repo)?;
    let listing = ctx.session.query(&dataset).await?;
    tracing::debug!(%dataset, files = listing.files.len(), "query listing");

    for line in render_listing(&listing) {
        println!("{line}");
    }
    Ok(())
}
