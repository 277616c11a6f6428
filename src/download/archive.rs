//! Append-only completion log.
//!
//! One url per line, appended and flushed the instant a download+tag
//! succeeds. A url in the log is never re-processed in any later run;
//! a missing log file is an empty log.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Errors produced by completion log operations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// I/O error reading or appending the log file.
    #[error("I/O error on completion log: {0}")]
    Io(#[from] std::io::Error),
}

/// The set of already-completed urls plus an open append handle.
///
/// The handle lives for the duration of the download phase and is closed
/// on drop, so every exit path flushes.
#[derive(Debug)]
pub struct CompletionLog {
    urls: HashSet<String>,
    file: File,
}

impl CompletionLog {
    /// Opens the log at `path`, loading previously completed urls.
    ///
    /// A missing file starts an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] when the file exists but cannot be read,
    /// or cannot be opened for append.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let urls = match File::open(path) {
            Ok(file) => BufReader::new(file)
                .lines()
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            Err(err) if err.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(err) => return Err(err.into()),
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path = %path.display(), completed = urls.len(), "opened completion log");
        Ok(Self { urls, file })
    }

    /// True when `url` was already downloaded and tagged.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Number of completed urls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// True when nothing has completed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Records a completed url: append, flush, remember.
    ///
    /// The flush is the durability contract: a crash after `record`
    /// returns never re-downloads this url.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] when the append or flush fails.
    pub fn record(&mut self, url: &str) -> Result<(), ArchiveError> {
        writeln!(self.file, "{url}")?;
        self.file.flush()?;
        self.urls.insert(url.to_string());
        Ok(())
    }
}
