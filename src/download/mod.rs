//! Download execution: filename derivation, completion log, fetch loop.

mod archive;
mod engine;
mod fetch;
mod filename;

pub use archive::{ArchiveError, CompletionLog};
pub use engine::{DownloadStats, run_downloads};
pub use fetch::{FetchError, Fetcher, YtDlpFetcher};
pub use filename::derive_stem;

/// Extension of every downloaded media file.
pub const AUDIO_EXTENSION: &str = "opus";
