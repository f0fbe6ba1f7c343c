//! Parallel metadata extraction over many files.
//!
//! Every file is read in its own task with no shared state besides the
//! concurrency limit. A failure is recorded in that file's report and never
//! stops the others.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::error::MetadataError;
use crate::format::tiff::{read_tiff_metadata_from_path, ImageMetadata};

/// Outcome of reading one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Result<ImageMetadata, MetadataError>,
}

impl FileReport {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Success and failure counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        Self {
            succeeded,
            failed: reports.len() - succeeded,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Read metadata for every path, at most `concurrency` files at a time.
///
/// Reports come back in the same order as `paths`. Dropping the returned
/// future aborts all in-flight reads.
pub async fn extract_all(paths: Vec<PathBuf>, concurrency: usize) -> Vec<FileReport> {
    let limit = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let limit = Arc::clone(&limit);
        tasks.spawn(async move {
            // The semaphore is never closed
            let _permit = limit.acquire_owned().await.ok();
            debug!(file = %path.display(), "reading metadata");
            let outcome = read_tiff_metadata_from_path(&path).await;
            (index, FileReport { path, outcome })
        });
    }

    let mut slots: Vec<Option<FileReport>> = Vec::new();
    slots.resize_with(tasks.len(), || None);

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, report)) => slots[index] = Some(report),
            Err(e) => error!("Metadata task failed: {}", e),
        }
    }

    slots.into_iter().flatten().collect()
}
