//! Catalogue line tokenizer.
//!
//! Each catalogue line is classified into exactly one [`LineKind`] before
//! the parser acts on it, keeping the state machine a single dispatch
//! step.

/// One classified catalogue line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty line; resets the parsing context.
    Blank,
    /// Line starting with `#`; ignored.
    Comment,
    /// `ALBUM <name>`: sets the album and starts track numbering at 1.
    Album(String),
    /// `ARTIST <name>`: sets the artist override.
    Artist(String),
    /// `PLAYLISTS <a, b, ...>`: replaces the active playlist groups.
    Playlists(Vec<String>),
    /// A well-formed http(s) url to expand.
    Url(String),
    /// Anything else; fatal syntax error at the parser level.
    Invalid,
}

/// Classifies one catalogue line (already stripped of surrounding
/// whitespace by the caller).
#[must_use]
pub fn classify(line: &str) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') {
        return LineKind::Comment;
    }
    if let Some(name) = directive_argument(line, "ALBUM ") {
        return LineKind::Album(name.to_string());
    }
    if let Some(name) = directive_argument(line, "ARTIST ") {
        return LineKind::Artist(name.to_string());
    }
    if let Some(names) = directive_argument(line, "PLAYLISTS ") {
        let names: Vec<String> = names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(std::string::ToString::to_string)
            .collect();
        return LineKind::Playlists(names);
    }
    if is_url(line) {
        return LineKind::Url(line.to_string());
    }
    LineKind::Invalid
}

/// Returns the directive argument when `line` starts with `keyword` and
/// carries a non-empty remainder.
fn directive_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    (!rest.is_empty()).then_some(rest)
}

/// True for a well-formed catalogue url: http or https scheme and a dot
/// somewhere after it. Anything beyond that is the resolver's problem.
#[must_use]
pub fn is_url(line: &str) -> bool {
    let rest = if let Some(rest) = line.strip_prefix("https://") {
        rest
    } else if let Some(rest) = line.strip_prefix("http://") {
        rest
    } else {
        return false;
    };
    rest.contains('.')
}
