//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Turn a line-oriented music catalogue into a resumable download queue.
///
/// mdl parses a catalogue of track and playlist urls, resolves metadata
/// through yt-dlp (caching results across runs), emits playlist files,
/// and downloads whatever the completion log says is still missing.
#[derive(Parser, Debug)]
#[command(name = "mdl")]
#[command(author, version, about)]
pub struct Args {
    /// Catalogue file to parse
    #[arg(default_value = "catalogue")]
    pub catalogue: PathBuf,

    /// Download list file (resolver cache persisted across runs)
    #[arg(long, default_value = ".dlist")]
    pub dlist: PathBuf,

    /// Completion log of already-downloaded urls
    #[arg(long, default_value = ".archive")]
    pub archive: PathBuf,

    /// Directory for media and playlist files
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Ignore the cached download list and re-resolve every url
    #[arg(long)]
    pub force_refresh: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
