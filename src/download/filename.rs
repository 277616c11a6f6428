//! Deterministic filename stem derivation.
//!
//! Two entries with the same url always share a stem; different urls get
//! different stems with overwhelming probability (bounded by the 8-char
//! hash space, an accepted trade-off).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Stems never exceed this many characters.
const MAX_STEM_CHARS: usize = 1023;

/// Characters of the url digest kept in the stem.
const HASH_CHARS: usize = 8;

/// Derives the on-disk filename stem for an entry: `"{title} [{hash8}]"`
/// with filesystem-illegal characters stripped.
///
/// Pure and deterministic in `title` and `url`.
#[must_use]
pub fn derive_stem(title: &str, url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let hash: String = STANDARD.encode(digest).chars().take(HASH_CHARS).collect();
    let desired = format!("{title} [{hash}]");
    desired
        .chars()
        .filter(|c| !is_illegal(*c))
        .take(MAX_STEM_CHARS)
        .collect()
}

/// Characters illegal in common filesystems.
fn is_illegal(c: char) -> bool {
    matches!(
        c,
        '\0' | '/' | '\\' | '<' | '>' | ':' | '|' | '?' | '*' | '"'
    )
}
