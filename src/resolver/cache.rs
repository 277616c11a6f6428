//! Previous-run resolver cache.
//!
//! The download list written at the end of one run is loaded at the start
//! of the next and keyed by url. A url found here is never re-resolved:
//! the expander synthesizes a track entry from the cached fields instead
//! of calling the collaborator.

use std::collections::HashMap;

use crate::dlist::Dentry;

/// In-memory map from url to the entry resolved for it on a previous run.
///
/// Loading the whole list into memory is fine for human-authored catalogue
/// sizes; see the design notes.
#[derive(Debug, Default)]
pub struct ResolverCache {
    entries: HashMap<String, Dentry>,
}

impl ResolverCache {
    /// Creates an empty cache (every url will be freshly resolved).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a cache from a previously persisted download list.
    ///
    /// Later rows win on duplicate urls, matching append order.
    #[must_use]
    pub fn from_entries(entries: Vec<Dentry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.url.clone(), entry))
            .collect();
        Self { entries }
    }

    /// Pure lookup; no collaborator call is ever made for a hit.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Dentry> {
        self.entries.get(url)
    }

    /// Number of cached urls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
