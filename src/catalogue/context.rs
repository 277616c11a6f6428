//! Parsing context threaded through the catalogue state machine.

/// Current parsing context.
///
/// The catalogue parser is the only mutator; the expander reads it. A
/// blank catalogue line resets the whole context via [`ParseContext::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Artist override for subsequent url lines ("" = use resolved value).
    pub artist: String,
    /// Album for subsequent url lines ("" = no album).
    pub album: String,
    /// Next track number within the current ALBUM block; 0 = not tracking.
    pub track_number: u32,
    /// Playlist groups every subsequent entry is appended to.
    pub active_playlists: Vec<String>,
}

impl ParseContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the empty state (blank catalogue line).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True while inside an ALBUM block, where entries get sequential
    /// track numbers.
    #[must_use]
    pub fn numbering(&self) -> bool {
        self.track_number > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_reset_clears_everything() {
        let mut ctx = ParseContext {
            artist: "A".to_string(),
            album: "B".to_string(),
            track_number: 7,
            active_playlists: vec!["x".to_string()],
        };
        ctx.reset();
        assert_eq!(ctx, ParseContext::new());
    }

    #[test]
    fn test_numbering_only_inside_album_block() {
        let mut ctx = ParseContext::new();
        assert!(!ctx.numbering());
        ctx.track_number = 1;
        assert!(ctx.numbering());
    }
}
