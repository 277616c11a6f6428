//! Sequential, archive-gated download loop.
//!
//! Walks the resolved queue in order, skipping urls already in the
//! completion log and delegating the rest to the [`Fetcher`]. One bad
//! entry never aborts the run; only a completion log write failure does,
//! since continuing without durability would break resumability.

use tracing::{info, warn};

use super::archive::{ArchiveError, CompletionLog};
use super::fetch::Fetcher;
use super::filename::derive_stem;
use crate::dlist::Dentry;

/// Counters from one download loop run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    /// Entries downloaded, tagged, and recorded this run.
    pub completed: usize,
    /// Entries that failed and were left for a future run.
    pub failed: usize,
    /// Entries already in the completion log.
    pub skipped: usize,
}

/// Runs the download loop over `entries`.
///
/// # Errors
///
/// Returns [`ArchiveError`] only when the completion log itself cannot be
/// appended; fetch failures are warnings counted in the stats.
pub async fn run_downloads(
    entries: &[Dentry],
    log: &mut CompletionLog,
    fetcher: &dyn Fetcher,
) -> Result<DownloadStats, ArchiveError> {
    let mut stats = DownloadStats::default();

    for entry in entries {
        if log.contains(&entry.url) {
            stats.skipped += 1;
            continue;
        }

        info!(title = %entry.title, url = %entry.url, "downloading");
        let stem = derive_stem(&entry.title, &entry.url);
        match fetcher.fetch(entry, &stem).await {
            Ok(()) => {
                log.record(&entry.url)?;
                stats.completed += 1;
            }
            Err(error) => {
                warn!(url = %entry.url, %error, "failed to download");
                stats.failed += 1;
            }
        }
    }

    info!(
        completed = stats.completed,
        failed = stats.failed,
        skipped = stats.skipped,
        "download loop finished"
    );
    Ok(stats)
}
