//! Line-oriented catalogue parsing.
//!
//! A catalogue is consumed top-to-bottom by a small state machine over
//! [`ParseContext`]: directives mutate the context, url lines are handed
//! to the [`Expander`], and the produced entries are appended to the
//! download list and to every active playlist group.
//!
//! # Grammar
//!
//! | line | action |
//! |---|---|
//! | empty | reset context |
//! | `# ...` | ignored |
//! | `ALBUM <name>` | set album, start numbering at 1 |
//! | `ARTIST <name>` | set artist |
//! | `PLAYLISTS <a, b>` | set active playlist groups |
//! | http(s) url | expand and append entries |
//! | anything else | fatal syntax error with 1-based line number |

mod context;
mod error;
mod expand;
mod line;

pub use context::ParseContext;
pub use error::CatalogueError;
pub use expand::Expander;
pub use line::{LineKind, classify, is_url};

use tracing::{debug, info};

use crate::dlist::{DownloadList, PlaylistGroups};

/// Everything collected from one catalogue parse.
#[derive(Debug, Default)]
pub struct CatalogueResult {
    /// Ordered entry queue, in catalogue discovery order.
    pub dlist: DownloadList,
    /// Named playlist groups accumulated along the way.
    pub playlists: PlaylistGroups,
}

/// Parses catalogue text into an ordered download list and playlist
/// groups.
///
/// # Errors
///
/// Returns [`CatalogueError::InvalidSyntax`] on the first unrecognizable
/// line; no partial output survives. Resolution failures during expansion
/// are warnings only.
pub async fn parse_catalogue(
    input: &str,
    expander: &Expander,
) -> Result<CatalogueResult, CatalogueError> {
    let mut ctx = ParseContext::new();
    let mut result = CatalogueResult::default();

    for (index, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        match classify(line) {
            LineKind::Blank => ctx.reset(),
            LineKind::Comment => {}
            LineKind::Album(name) => {
                debug!(album = %name, "entering album block");
                ctx.album = name;
                ctx.track_number = 1;
            }
            LineKind::Artist(name) => ctx.artist = name,
            LineKind::Playlists(names) => ctx.active_playlists = names,
            LineKind::Url(url) => {
                for mut entry in expander.expand(&url, &ctx).await {
                    if ctx.numbering() {
                        entry.track_number = ctx.track_number;
                        ctx.track_number += 1;
                    }
                    for playlist in &ctx.active_playlists {
                        result.playlists.add(playlist, entry.clone());
                    }
                    result.dlist.push(entry);
                }
            }
            LineKind::Invalid => {
                return Err(CatalogueError::invalid_syntax(index + 1, line));
            }
        }
    }

    info!(
        entries = result.dlist.len(),
        playlists = result.playlists.iter().count(),
        "catalogue parsed"
    );
    Ok(result)
}
