//! Playlist group file emission.
//!
//! One `<group>.m3u` per named playlist group, overwriting any previous
//! file, listing each entry's derived media filename in discovery order.
//!
//! # Module structure note
//!
//! Single-file module: the feature scope is one write loop and does not
//! warrant sub-files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::dlist::PlaylistGroups;
use crate::download::{AUDIO_EXTENSION, derive_stem};

/// Extension of emitted playlist files.
pub const LIST_EXTENSION: &str = "m3u";

/// Writes one playlist file per group into `dir`.
///
/// Returns the paths written, in group order.
///
/// # Errors
///
/// Returns `std::io::Error` on any write failure; callers treat this as
/// fatal (disk-full, permissions).
pub fn write_playlist_files(groups: &PlaylistGroups, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (name, entries) in groups.iter() {
        let path = dir.join(format!("{name}.{LIST_EXTENSION}"));
        info!(path = %path.display(), tracks = entries.len(), "writing playlist file");

        let mut writer = BufWriter::new(File::create(&path)?);
        for entry in entries {
            let stem = derive_stem(&entry.title, &entry.url);
            writeln!(writer, "{stem}.{AUDIO_EXTENSION}")?;
        }
        writer.flush()?;
        written.push(path);
    }

    Ok(written)
}
