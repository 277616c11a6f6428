//! yt-dlp metadata collaborator.
//!
//! Resolution shells out to `yt-dlp --dump-single-json` in simulate mode,
//! with playlist entries kept flat so a playlist resolves to child urls
//! without fetching per-track metadata. Retries are yt-dlp's own
//! (`--retries`); this module makes exactly one attempt per call.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, info};

use super::{ResolveError, ResolvedInfo, Resolver, TrackInfo};

/// Retry count passed to yt-dlp for metadata lookups.
const INFO_RETRIES: u32 = 4;

/// Locates the yt-dlp binary.
///
/// `$YTDLP_PATH` wins when set; otherwise `PATH` is searched.
///
/// # Errors
///
/// Returns [`which::Error`] when no binary can be found.
pub fn ytdlp_binary() -> Result<PathBuf, which::Error> {
    if let Ok(path) = std::env::var("YTDLP_PATH") {
        return which::which(path);
    }
    which::which("yt-dlp")
}

/// Resolver backed by a `yt-dlp` subprocess.
///
/// The binary is located lazily on first use, so runs that are fully
/// served by the resolver cache never require yt-dlp to be installed.
#[derive(Debug, Default)]
pub struct YtDlpResolver {
    _private: (),
}

impl YtDlpResolver {
    /// Creates a new resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Resolver for YtDlpResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedInfo, ResolveError> {
        let yt_dlp = ytdlp_binary()?;
        info!(url, "downloading info");

        let output = Command::new(&yt_dlp)
            .arg("--dump-single-json")
            .arg("--flat-playlist")
            .arg("--simulate")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--retries")
            .arg(INFO_RETRIES.to_string())
            .arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let reason = String::from_utf8_lossy(&output.stderr)
                .lines()
                .last()
                .unwrap_or("yt-dlp exited with failure")
                .to_string();
            return Err(ResolveError::Failed {
                url: url.to_string(),
                reason,
            });
        }

        let info: Value =
            serde_json::from_slice(&output.stdout).map_err(|err| ResolveError::BadOutput {
                url: url.to_string(),
                reason: err.to_string(),
            })?;

        parse_info(url, &info)
    }
}

/// Interprets a yt-dlp info document as track or playlist metadata.
fn parse_info(url: &str, info: &Value) -> Result<ResolvedInfo, ResolveError> {
    if info.get("_type").and_then(Value::as_str) == Some("playlist") {
        let entries = info
            .get("entries")
            .and_then(Value::as_array)
            .ok_or_else(|| ResolveError::BadOutput {
                url: url.to_string(),
                reason: "playlist info without entries".to_string(),
            })?;
        let child_urls: Vec<String> = entries.iter().filter_map(entry_url).collect();
        debug!(url, children = child_urls.len(), "resolved playlist");
        return Ok(ResolvedInfo::Playlist {
            entries: child_urls,
        });
    }

    let canonical = entry_url(info).ok_or_else(|| ResolveError::BadOutput {
        url: url.to_string(),
        reason: "track info without a url".to_string(),
    })?;
    let title = str_field(info, "track").or_else(|| str_field(info, "title"));
    let artist = str_field(info, "channel").or_else(|| str_field(info, "uploader"));
    let thumbnail = str_field(info, "thumbnail");

    debug!(url, canonical, "resolved track");
    Ok(ResolvedInfo::Track(TrackInfo {
        url: canonical,
        title,
        artist,
        thumbnail,
    }))
}

/// Canonical url of one info entry: `webpage_url`, falling back to `url`.
fn entry_url(entry: &Value) -> Option<String> {
    str_field(entry, "webpage_url").or_else(|| str_field(entry, "url"))
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(std::string::ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_track_info_prefers_track_and_channel() {
        let info = json!({
            "webpage_url": "https://example.com/watch?v=1",
            "track": "Song",
            "title": "Song (Official Video)",
            "channel": "Band",
            "uploader": "band-topic",
            "thumbnail": "https://example.com/thumb.jpg",
        });

        let resolved = parse_info("https://example.com/1", &info).unwrap();
        let ResolvedInfo::Track(track) = resolved else {
            panic!("expected track");
        };
        assert_eq!(track.url, "https://example.com/watch?v=1");
        assert_eq!(track.title.as_deref(), Some("Song"));
        assert_eq!(track.artist.as_deref(), Some("Band"));
        assert_eq!(track.thumbnail.as_deref(), Some("https://example.com/thumb.jpg"));
    }

    #[test]
    fn test_parse_track_info_falls_back_to_title_and_uploader() {
        let info = json!({
            "url": "https://example.com/watch?v=2",
            "title": "Plain Title",
            "uploader": "someone",
        });

        let ResolvedInfo::Track(track) = parse_info("https://example.com/2", &info).unwrap()
        else {
            panic!("expected track");
        };
        assert_eq!(track.url, "https://example.com/watch?v=2");
        assert_eq!(track.title.as_deref(), Some("Plain Title"));
        assert_eq!(track.artist.as_deref(), Some("someone"));
        assert!(track.thumbnail.is_none());
    }

    #[test]
    fn test_parse_playlist_info_collects_child_urls_in_order() {
        let info = json!({
            "_type": "playlist",
            "entries": [
                { "webpage_url": "https://example.com/a" },
                { "url": "https://example.com/b" },
                { "no_url_here": true },
            ],
        });

        let resolved = parse_info("https://example.com/list", &info).unwrap();
        assert_eq!(
            resolved,
            ResolvedInfo::Playlist {
                entries: vec![
                    "https://example.com/a".to_string(),
                    "https://example.com/b".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_parse_track_info_without_url_is_bad_output() {
        let info = json!({ "title": "No url at all" });
        let err = parse_info("https://example.com/x", &info).unwrap_err();
        assert!(matches!(err, ResolveError::BadOutput { .. }));
    }

    #[test]
    fn test_parse_playlist_info_without_entries_is_bad_output() {
        let info = json!({ "_type": "playlist" });
        let err = parse_info("https://example.com/x", &info).unwrap_err();
        assert!(matches!(err, ResolveError::BadOutput { .. }));
    }
}
