//! URL classification helpers

use url::Url;

/// Check if URL points at a playlist
///
/// A `/playlist` path or a `list` query parameter marks a playlist. Anything
/// that does not parse falls back to a plain substring check.
pub fn is_playlist_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            parsed.path().contains("/playlist")
                || parsed
                    .query_pairs()
                    .any(|(key, value)| key == "list" && !value.is_empty())
        }
        Err(_) => url.contains("playlist") || url.contains("&list="),
    }
}
