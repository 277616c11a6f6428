//! CSV persistence of the resolved download list.
//!
//! The file doubles as the resolver cache for the next run: each row holds
//! the last successfully resolved fields for one url, in the stable column
//! order artist, title, album, track_number, url. A missing file is an
//! empty list, not an error.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::Dentry;

/// Errors produced while reading or writing the download list file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// I/O error opening or writing the list file.
    #[error("I/O error on download list: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed row in a previously persisted list.
    #[error("malformed download list row: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads a previously persisted download list.
///
/// Returns an empty list when the file does not exist.
///
/// # Errors
///
/// Returns [`PersistError`] when the file exists but cannot be read or a
/// row does not deserialize.
pub fn read_dlist(path: &Path) -> Result<Vec<Dentry>, PersistError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no previous download list");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(file);
    let mut entries = Vec::new();
    for row in reader.deserialize() {
        entries.push(row?);
    }
    debug!(path = %path.display(), entries = entries.len(), "loaded download list");
    Ok(entries)
}

/// Writes the download list, overwriting any previous file.
///
/// # Errors
///
/// Returns [`PersistError`] on I/O failure; callers treat this as fatal.
pub fn write_dlist(path: &Path, entries: &[Dentry]) -> Result<(), PersistError> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), entries = entries.len(), "wrote download list");
    Ok(())
}
