//! Sequential per-file dispatch.
//!
//! Files are processed strictly one at a time in manifest order. Concurrency
//! only exists inside a segmented transfer.

use std::path::Path;
use std::sync::Arc;

use dsync_core::{DatasetHubPort, DownloadResult, DownloadSummary, FileOutcome, TargetKind};

use crate::local_state::LocalStateChecker;
use crate::plan::{Decision, DownloadPlan, PlannedFile, common_parent};
use crate::progress::{DispatchEvent, ProgressAggregator, ProgressSink, TransferProgress};
use crate::strategy::DownloadStrategy;
use crate::transport::ByteSource;

/// Drives a [`DownloadPlan`] to completion.
///
/// Per file: `Pending -> Skipped | Downloading -> Done | Failed`. A failed
/// file ends the run; later files are not attempted.
pub struct DownloadDispatcher {
    hub: Arc<dyn DatasetHubPort>,
    source: Arc<dyn ByteSource>,
    sink: Arc<dyn ProgressSink>,
    checker: LocalStateChecker,
}

impl DownloadDispatcher {
    /// Create a dispatcher.
    pub fn new(
        hub: Arc<dyn DatasetHubPort>,
        source: Arc<dyn ByteSource>,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            hub,
            source,
            sink,
            checker: LocalStateChecker,
        }
    }

    /// Process every planned file and classify the result.
    pub async fn run(&self, plan: &DownloadPlan) -> DownloadResult<DownloadSummary> {
        let mut progress = ProgressAggregator::new(plan.total_bytes(), plan.len());
        let mut outcomes = Vec::with_capacity(plan.len());

        for (position, file) in plan.files().iter().enumerate() {
            let index = position + 1;
            let verified = self
                .checker
                .should_skip(&file.target, file.entry.expected_hash())
                .await?;

            let outcome = match file.decide(verified) {
                Decision::Skip => {
                    tracing::debug!(path = %file.entry.path, "verified local copy, skipping");
                    let snapshot = progress.advance(file.entry.size);
                    self.sink.on_event(&DispatchEvent::Skipped {
                        index,
                        entry: &file.entry,
                        target: &file.target,
                        progress: snapshot,
                    });
                    FileOutcome::Skipped
                }
                Decision::Fetch(strategy) => {
                    self.transfer(plan, file, index, strategy).await?;
                    let snapshot = progress.advance(file.entry.size);
                    self.sink.on_event(&DispatchEvent::Downloaded {
                        index,
                        entry: &file.entry,
                        mode: strategy.mode(),
                        progress: snapshot,
                    });
                    FileOutcome::Downloaded(strategy.mode())
                }
            };
            outcomes.push(outcome);
        }

        let kind = TargetKind::classify(plan.len());
        let local_path = match kind {
            TargetKind::File => plan
                .files()
                .first()
                .map_or_else(|| plan.dataset_dir().to_path_buf(), |f| f.target.clone()),
            TargetKind::Folder => {
                let targets: Vec<&Path> = plan.files().iter().map(|f| f.target.as_path()).collect();
                common_parent(&targets, plan.dataset_dir())
            }
        };

        tracing::info!(
            kind = %kind,
            path = %local_path.display(),
            files = outcomes.len(),
            "dispatch complete"
        );

        Ok(DownloadSummary {
            kind,
            local_path,
            outcomes,
            total_bytes: plan.total_bytes(),
        })
    }

    async fn transfer(
        &self,
        plan: &DownloadPlan,
        file: &PlannedFile,
        index: usize,
        strategy: DownloadStrategy,
    ) -> DownloadResult<()> {
        // Resolved right before use; URLs may be single-use
        let url = self
            .hub
            .resolve_download_url(plan.dataset_id(), &file.entry)
            .await?;

        self.sink.on_event(&DispatchEvent::TransferStarted {
            index,
            entry: &file.entry,
            mode: strategy.mode(),
        });
        tracing::debug!(path = %file.entry.path, size = file.entry.size, mode = %strategy.mode(), "fetching");

        let live = Arc::new(TransferProgress::new(
            file.entry.path.clone(),
            file.entry.size,
            Arc::clone(&self.sink),
        ));
        strategy
            .fetch(
                Arc::clone(&self.source),
                &url,
                &file.target,
                file.entry.size,
                live,
            )
            .await?;
        Ok(())
    }
}
