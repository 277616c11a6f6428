//! Playlist expansion: one catalogue url becomes zero or more entries.
//!
//! Expansion is iterative (explicit worklist) with a visited-url set, so a
//! playlist that transitively contains itself terminates instead of
//! recursing forever. Children of a playlist are visited depth-first in
//! playlist order, all inheriting the enclosing parsing context.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::context::ParseContext;
use crate::dlist::Dentry;
use crate::resolver::{ResolvedInfo, Resolver, ResolverCache};

/// Expands catalogue urls into download entries via the resolver cache
/// and the external collaborator.
pub struct Expander {
    resolver: Box<dyn Resolver>,
    cache: ResolverCache,
}

impl Expander {
    /// Creates an expander over the given collaborator and previous-run
    /// cache.
    #[must_use]
    pub fn new(resolver: Box<dyn Resolver>, cache: ResolverCache) -> Self {
        Self { resolver, cache }
    }

    /// Expands `url` into entries, in discovery order.
    ///
    /// Track numbers on the returned entries are 0; the parser assigns
    /// them at append time. Resolution failures and revisited urls
    /// produce warnings, never errors.
    pub async fn expand(&self, url: &str, ctx: &ParseContext) -> Vec<Dentry> {
        let mut entries = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        // Depth-first worklist; children are pushed in reverse so they
        // pop in playlist order.
        let mut worklist = vec![url.to_string()];

        while let Some(current) = worklist.pop() {
            if !visited.insert(current.clone()) {
                warn!(url = %current, "cyclic playlist reference, skipping");
                continue;
            }

            if let Some(cached) = self.cache.get(&current) {
                debug!(url = %current, "resolver cache hit");
                entries.push(merge_cached(cached, ctx));
                continue;
            }

            match self.resolver.resolve(&current).await {
                Ok(ResolvedInfo::Track(track)) => {
                    entries.push(Dentry {
                        artist: pick(&ctx.artist, track.artist.as_deref()),
                        title: track.title.unwrap_or_default(),
                        album: ctx.album.clone(),
                        track_number: 0,
                        url: track.url,
                    });
                }
                Ok(ResolvedInfo::Playlist { entries: children }) => {
                    if children.is_empty() {
                        warn!(url = %current, "playlist resolved to no entries");
                    }
                    for child in children.into_iter().rev() {
                        worklist.push(child);
                    }
                }
                Err(error) => {
                    warn!(url = %current, %error, "failed to download info");
                }
            }
        }

        entries
    }
}

/// Synthesizes an entry from a cache hit, context fields winning when
/// non-empty.
fn merge_cached(cached: &Dentry, ctx: &ParseContext) -> Dentry {
    Dentry {
        artist: pick(&ctx.artist, Some(cached.artist.as_str())),
        title: cached.title.clone(),
        album: pick(&ctx.album, Some(cached.album.as_str())),
        track_number: 0,
        url: cached.url.clone(),
    }
}

fn pick(context_value: &str, fallback: Option<&str>) -> String {
    if context_value.is_empty() {
        fallback.unwrap_or_default().to_string()
    } else {
        context_value.to_string()
    }
}
