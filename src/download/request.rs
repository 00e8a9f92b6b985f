//! What the executor is asked to fetch

use crate::download::template::OutputTemplate;
use std::path::PathBuf;

/// Upper bound on the vertical resolution to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionConstraint {
    pub max_height: u32,
}

impl ResolutionConstraint {
    pub fn new(max_height: u32) -> Self {
        Self { max_height }
    }

    /// yt-dlp format expression honouring the constraint
    ///
    /// Separate streams at or below the bound are preferred. A muxed stream at
    /// or below the bound comes next. The best available is the last resort.
    pub fn format_expression(&self) -> String {
        format!(
            "bestvideo[height<={h}]+bestaudio/best[height<={h}]/bestvideo+bestaudio/best",
            h = self.max_height
        )
    }
}

/// Single download invocation
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Item or playlist URL
    pub url: String,
    /// Directory the files land in
    pub destination: PathBuf,
    /// Resolution bound
    pub constraint: ResolutionConstraint,
    /// File naming template
    pub template: OutputTemplate,
    /// Whether the URL is a playlist
    pub playlist: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expression() {
        assert_eq!(
            ResolutionConstraint::new(720).format_expression(),
            "bestvideo[height<=720]+bestaudio/best[height<=720]/bestvideo+bestaudio/best"
        );
    }
}
