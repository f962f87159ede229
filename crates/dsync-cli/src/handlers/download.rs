//! `get` and `download` handlers.

use dsync_core::{DownloadError, DownloadSummary};
use dsync_download::SessionOutcome;

use crate::bootstrap::CliContext;
use crate::error::CliError;

use super::parse_dataset;

/// Download the whole repository.
pub async fn get(ctx: &CliContext, repo: &str) -> Result<(), CliError> {
    let dataset = parse_dataset(repo)?;
    let outcome = ctx.session.get(&dataset).await;
    report(ctx, outcome, &dataset.to_string())
}

/// Download the files under `source` only.
pub async fn download(ctx: &CliContext, repo: &str, source: &str) -> Result<(), CliError> {
    let dataset = parse_dataset(repo)?;
    let outcome = ctx.session.download(&dataset, source).await;
    report(ctx, outcome, &format!("{dataset} ({source})"))
}

fn report(
    ctx: &CliContext,
    outcome: Result<SessionOutcome, DownloadError>,
    what: &str,
) -> Result<(), CliError> {
    ctx.progress.finish();
    match outcome? {
        SessionOutcome::Completed(summary) => {
            for line in completion_lines(&summary) {
                ctx.progress.message(&line);
            }
        }
        SessionOutcome::NothingToDownload => {
            ctx.progress
                .message(&format!("No files found in {what}, nothing to download."));
        }
    }
    Ok(())
}

/// Closing lines of a successful run.
pub fn completion_lines(summary: &DownloadSummary) -> [String; 2] {
    [
        "Download Completed.".to_string(),
        format!(
            "The {} has been successfully downloaded to {}",
            summary.kind,
            summary.local_path.display()
        ),
    ]
}
