//! Download list entries and playlist groupings.
//!
//! A [`Dentry`] is the unit of work for the whole pipeline: one resolved
//! catalogue entry with the fields needed to download and tag a single
//! track. Entries are value objects; once appended to a [`DownloadList`]
//! they are never mutated.

mod persist;

pub use persist::{PersistError, read_dlist, write_dlist};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single resolved catalogue entry.
///
/// `track_number == 0` means the entry is not part of a numbered album.
/// Field order matters: it is the stable column order of the persisted
/// download list (artist, title, album, track_number, url).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dentry {
    /// Artist name, from catalogue context or resolved metadata.
    pub artist: String,
    /// Track title, from resolved or cached metadata.
    pub title: String,
    /// Album name, from catalogue context (empty if none).
    pub album: String,
    /// 1-based position within the enclosing ALBUM block, 0 if none.
    pub track_number: u32,
    /// Resolved canonical source url.
    pub url: String,
}

impl fmt::Display for Dentry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" <{}>", self.title, self.url)
    }
}

/// Ordered queue of entries in catalogue discovery order.
#[derive(Debug, Default)]
pub struct DownloadList {
    /// Entries in discovery order.
    pub entries: Vec<Dentry>,
}

impl DownloadList {
    /// Creates a new empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, preserving discovery order.
    pub fn push(&mut self, entry: Dentry) {
        self.entries.push(entry);
    }

    /// Returns true if no entries were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Dentry> {
        self.entries.iter()
    }
}

/// Named playlist buckets accumulated during parsing.
///
/// Group order is first-activation order; entries within a group are in
/// discovery order. Both orders are load-bearing for the emitted files.
#[derive(Debug, Default)]
pub struct PlaylistGroups {
    groups: Vec<(String, Vec<Dentry>)>,
}

impl PlaylistGroups {
    /// Creates an empty set of groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` to the named group, creating it on first use.
    pub fn add(&mut self, name: &str, entry: Dentry) {
        if let Some((_, entries)) = self.groups.iter_mut().find(|(n, _)| n == name) {
            entries.push(entry);
        } else {
            self.groups.push((name.to_string(), vec![entry]));
        }
    }

    /// Returns true if no group was ever activated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over `(name, entries)` pairs in first-activation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Dentry])> {
        self.groups
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(title: &str, url: &str) -> Dentry {
        Dentry {
            artist: String::new(),
            title: title.to_string(),
            album: String::new(),
            track_number: 0,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_download_list_preserves_order() {
        let mut list = DownloadList::new();
        list.push(entry("a", "https://example.com/a"));
        list.push(entry("b", "https://example.com/b"));

        assert_eq!(list.len(), 2);
        let titles: Vec<_> = list.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn test_playlist_groups_first_activation_order() {
        let mut groups = PlaylistGroups::new();
        groups.add("road trip", entry("a", "https://example.com/a"));
        groups.add("focus", entry("b", "https://example.com/b"));
        groups.add("road trip", entry("c", "https://example.com/c"));

        let names: Vec<_> = groups.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["road trip", "focus"]);

        let (_, road_trip) = groups.iter().next().unwrap();
        let titles: Vec<_> = road_trip.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[test]
    fn test_playlist_groups_empty() {
        let groups = PlaylistGroups::new();
        assert!(groups.is_empty());
        assert_eq!(groups.iter().count(), 0);
    }

    #[test]
    fn test_dentry_display() {
        let e = entry("Song Title", "https://example.com/t");
        assert_eq!(e.to_string(), "\"Song Title\" <https://example.com/t>");
    }
}
