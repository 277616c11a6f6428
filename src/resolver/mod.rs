//! Metadata resolution seam for turning a source url into track or
//! playlist information.
//!
//! The pipeline never talks to the network itself: everything behind a url
//! is reached through the [`Resolver`] trait. The shipped implementation,
//! [`YtDlpResolver`], drives a `yt-dlp` subprocess; tests substitute plain
//! in-memory implementations.
//!
//! # Architecture
//!
//! - [`Resolver`] - Async trait the external collaborator implements
//! - [`ResolvedInfo`] - Tagged result: a single track or a list of child urls
//! - [`ResolverCache`] - Previous-run entries, consulted before any call

mod cache;
mod ytdlp;

pub use cache::ResolverCache;
pub use ytdlp::{YtDlpResolver, ytdlp_binary};

use async_trait::async_trait;
use thiserror::Error;

/// Resolved metadata for a single track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    /// Canonical source url (may differ from the url that was resolved).
    pub url: String,
    /// Track title, if the source exposes one.
    pub title: Option<String>,
    /// Artist / channel / uploader, if the source exposes one.
    pub artist: Option<String>,
    /// Thumbnail url, if any.
    pub thumbnail: Option<String>,
}

/// Result of resolving one url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedInfo {
    /// The url is a single track.
    Track(TrackInfo),
    /// The url is a playlist containing the given child urls, in order.
    Playlist {
        /// Child urls in playlist order.
        entries: Vec<String>,
    },
}

/// Errors produced by resolution.
///
/// Resolution failures are never fatal to a run: callers warn and skip the
/// url. Retry policy is owned by the collaborator.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The external collaborator reported failure (network error, removed
    /// content, exhausted retries).
    #[error("failed to resolve {url}: {reason}")]
    Failed {
        /// The url that could not be resolved.
        url: String,
        /// Collaborator-reported reason.
        reason: String,
    },

    /// The collaborator binary could not be located.
    #[error("yt-dlp binary not found: {0}")]
    BinaryNotFound(#[from] which::Error),

    /// The collaborator produced output that could not be interpreted.
    #[error("unreadable resolver output for {url}: {reason}")]
    BadOutput {
        /// The url being resolved.
        url: String,
        /// What was wrong with the output.
        reason: String,
    },

    /// I/O error spawning or waiting on the collaborator.
    #[error("resolver I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait the external metadata collaborator implements.
///
/// # Object Safety
///
/// Uses `async_trait` so the pipeline can hold a `dyn Resolver`; Rust 2024
/// native async traits are not object-safe.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves `url` into track or playlist metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the url cannot be resolved; callers
    /// treat this as a warning, not a fatal condition.
    async fn resolve(&self, url: &str) -> Result<ResolvedInfo, ResolveError>;
}
