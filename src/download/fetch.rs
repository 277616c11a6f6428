//! Fetch-and-tag collaborator seam.
//!
//! Retrieving the audio and writing its tags is one unit of work: either
//! both happen or the entry counts as failed and is retried on a later
//! run. The shipped [`YtDlpFetcher`] drives a `yt-dlp` subprocess and
//! then writes tags with `lofty`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use super::AUDIO_EXTENSION;
use crate::dlist::Dentry;
use crate::resolver::ytdlp_binary;

/// Retry counts passed to yt-dlp for media downloads.
const DOWNLOAD_RETRIES: u32 = 10;
const FRAGMENT_RETRIES: u32 = 10;

/// Errors produced by the fetch/tag collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The collaborator binary could not be located.
    #[error("yt-dlp binary not found: {0}")]
    BinaryNotFound(#[from] which::Error),

    /// yt-dlp reported failure after exhausting its own retries.
    #[error("failed to download {url}: {reason}")]
    Failed {
        /// The url that failed.
        url: String,
        /// Collaborator-reported reason.
        reason: String,
    },

    /// Tag writing failed on the downloaded file.
    #[error("failed to tag {path}: {source}")]
    Tag {
        /// Path of the downloaded file.
        path: String,
        /// Underlying lofty error.
        source: lofty::error::LoftyError,
    },

    /// I/O error spawning or waiting on the collaborator.
    #[error("fetch I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait the external fetch/tag collaborator implements.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Downloads `entry` to `<stem>.opus` and writes its tags.
    ///
    /// Must be idempotent: re-fetching an entry overwrites the same
    /// derived filename.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on failure; the download loop warns and
    /// moves on.
    async fn fetch(&self, entry: &Dentry, stem: &str) -> Result<(), FetchError>;
}

/// Fetcher backed by a `yt-dlp` subprocess plus lofty tag writing.
#[derive(Debug)]
pub struct YtDlpFetcher {
    output_dir: PathBuf,
}

impl YtDlpFetcher {
    /// Creates a fetcher writing media files into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Fetcher for YtDlpFetcher {
    async fn fetch(&self, entry: &Dentry, stem: &str) -> Result<(), FetchError> {
        let yt_dlp = ytdlp_binary()?;
        let template = self.output_dir.join(format!("{stem}.%(ext)s"));

        let output = Command::new(&yt_dlp)
            .arg("--format")
            .arg("bestaudio")
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg(AUDIO_EXTENSION)
            .arg("--audio-quality")
            .arg("5")
            .arg("--embed-thumbnail")
            .arg("--no-progress")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--retries")
            .arg(DOWNLOAD_RETRIES.to_string())
            .arg("--fragment-retries")
            .arg(FRAGMENT_RETRIES.to_string())
            .arg("--output")
            .arg(&template)
            .arg("--")
            .arg(&entry.url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let reason = String::from_utf8_lossy(&output.stderr)
                .lines()
                .last()
                .unwrap_or("yt-dlp exited with failure")
                .to_string();
            return Err(FetchError::Failed {
                url: entry.url.clone(),
                reason,
            });
        }

        let media_path = self.output_dir.join(format!("{stem}.{AUDIO_EXTENSION}"));
        write_tags(&media_path, entry)?;
        debug!(path = %media_path.display(), "downloaded and tagged");
        Ok(())
    }
}

/// Writes artist/album/track number/title into the downloaded file.
fn write_tags(path: &Path, entry: &Dentry) -> Result<(), FetchError> {
    let as_tag_error = |source: lofty::error::LoftyError| FetchError::Tag {
        path: path.display().to_string(),
        source,
    };

    let mut tagged = Probe::open(path)
        .map_err(as_tag_error)?
        .read()
        .map_err(as_tag_error)?;

    if tagged.primary_tag().is_none() {
        let tag_type = tagged.primary_tag_type();
        tagged.insert_tag(Tag::new(tag_type));
    }

    // Just inserted above when absent.
    let Some(tag) = tagged.primary_tag_mut() else {
        warn!(path = %path.display(), "no writable tag on downloaded file");
        return Ok(());
    };
    tag.set_artist(entry.artist.clone());
    tag.set_album(entry.album.clone());
    tag.set_title(entry.title.clone());
    if entry.track_number > 0 {
        tag.set_track(entry.track_number);
    }

    tagged
        .save_to_path(path, WriteOptions::default())
        .map_err(as_tag_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_failed_message() {
        let err = FetchError::Failed {
            url: "https://example.com/x".to_string(),
            reason: "HTTP 403".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/x"));
        assert!(msg.contains("HTTP 403"));
    }

    #[test]
    fn test_fetcher_output_template_is_in_output_dir() {
        let fetcher = YtDlpFetcher::new("/tmp/media");
        assert_eq!(fetcher.output_dir, PathBuf::from("/tmp/media"));
    }
}
