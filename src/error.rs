//! Error types for vget

use thiserror::Error;

/// Main error type for vget operations
#[derive(Debug, Error)]
pub enum VgetError {
    #[error("Failed to get info: {0}")]
    Fetch(String),

    #[error("No formats available for this video")]
    NoFormatsAvailable,

    #[error("No format found for {requested}p. {}", describe_heights(.available, .suggested))]
    NoVideoFormatFound {
        /// Requested vertical resolution
        requested: u32,
        /// Every distinct height the source offered
        available: Vec<u32>,
        /// Fallback height worth retrying with
        suggested: Option<u32>,
    },

    #[error("No videos found in playlist")]
    EmptyPlaylist,

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Download cancelled by user")]
    UserCancelled,

    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VgetError {
    /// Check if the error is the user declining the confirmation prompt
    pub fn is_cancellation(&self) -> bool {
        matches!(self, VgetError::UserCancelled)
    }

    /// Check if the error came from format selection rather than I/O
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            VgetError::NoFormatsAvailable | VgetError::NoVideoFormatFound { .. }
        )
    }
}

fn describe_heights(available: &[u32], suggested: &Option<u32>) -> String {
    if available.is_empty() {
        return "No suitable video formats found".to_string();
    }

    let labels: Vec<String> = available.iter().map(|h| format!("{}p", h)).collect();
    match suggested {
        Some(height) => format!(
            "Available resolutions: {}. Try {}p",
            labels.join(", "),
            height
        ),
        None => format!("Available resolutions: {}", labels.join(", ")),
    }
}
