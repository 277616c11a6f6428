//! mdl Core Library
//!
//! This library turns a human-authored, line-oriented catalogue of music
//! sources (direct tracks and/or playlists) into a deduplicated, ordered
//! download queue with idempotent, crash-resumable execution.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalogue`] - Line-oriented catalogue parsing and playlist expansion
//! - [`dlist`] - Download list entries, playlist groups, CSV persistence
//! - [`resolver`] - Metadata resolution seam and the previous-run cache
//! - [`download`] - Filename derivation, completion log, fetch loop
//! - [`playlist`] - Playlist group file emission
//!
//! The actual network fetch/transcode and tag writing live behind the
//! [`resolver::Resolver`] and [`download::Fetcher`] traits; the shipped
//! implementations drive a `yt-dlp` subprocess.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalogue;
pub mod dlist;
pub mod download;
pub mod playlist;
pub mod resolver;

// Re-export commonly used types
pub use catalogue::{
    CatalogueError, CatalogueResult, Expander, LineKind, ParseContext, parse_catalogue,
};
pub use dlist::{Dentry, DownloadList, PersistError, PlaylistGroups, read_dlist, write_dlist};
pub use download::{
    AUDIO_EXTENSION, ArchiveError, CompletionLog, DownloadStats, FetchError, Fetcher,
    YtDlpFetcher, derive_stem, run_downloads,
};
pub use playlist::write_playlist_files;
pub use resolver::{ResolveError, ResolvedInfo, Resolver, ResolverCache, TrackInfo, YtDlpResolver};
