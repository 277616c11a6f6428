//! CLI entry point for the mdl tool.

use anyhow::{Context, Result};
use clap::Parser;
use mdl_core::{
    CompletionLog, Expander, ResolverCache, YtDlpFetcher, YtDlpResolver, parse_catalogue,
    read_dlist, run_downloads, write_dlist, write_playlist_files,
};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("generating download list from catalogue");

    // Previous run's resolved entries double as the resolver cache.
    let previous = if args.force_refresh {
        debug!("cache disabled by --force-refresh");
        Vec::new()
    } else {
        read_dlist(&args.dlist)?
    };
    let cache = ResolverCache::from_entries(previous);

    let catalogue_text = std::fs::read_to_string(&args.catalogue)
        .with_context(|| format!("cannot read catalogue {}", args.catalogue.display()))?;

    let expander = Expander::new(Box::new(YtDlpResolver::new()), cache);
    let result = parse_catalogue(&catalogue_text, &expander).await?;

    if result.dlist.is_empty() {
        info!("catalogue produced no entries");
    }

    write_playlist_files(&result.playlists, &args.output_dir)
        .context("cannot write playlist files")?;
    write_dlist(&args.dlist, &result.dlist.entries)?;

    info!(entries = result.dlist.len(), "downloading audio");

    let mut log = CompletionLog::open(&args.archive)?;
    let fetcher = YtDlpFetcher::new(&args.output_dir);
    let stats = run_downloads(&result.dlist.entries, &mut log, &fetcher).await?;

    info!(
        completed = stats.completed,
        failed = stats.failed,
        skipped = stats.skipped,
        "done"
    );

    Ok(())
}
