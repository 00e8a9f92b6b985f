//! Media metadata structures

use crate::error::VgetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RESOLUTION_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(\d+)[pP]?$").expect("static resolution pattern")
});

/// One encoding variant offered by the source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Source-specific format identifier
    pub format_id: Option<String>,
    /// Container extension
    pub ext: Option<String>,
    /// Vertical resolution, if known
    pub height: Option<u32>,
    /// Whether the variant carries a video stream
    pub has_video: bool,
    /// Whether the variant carries an audio stream
    pub has_audio: bool,
    /// Declared file size in bytes
    pub file_size: Option<u64>,
}

impl FormatDescriptor {
    /// Video-capable variant at the given height
    pub fn video(height: u32, file_size: Option<u64>) -> Self {
        Self {
            height: Some(height),
            has_video: true,
            file_size,
            ..Self::default()
        }
    }

    /// Audio-only variant
    pub fn audio(file_size: Option<u64>) -> Self {
        Self {
            has_audio: true,
            file_size,
            ..Self::default()
        }
    }

    /// Height usable for resolution matching; zero counts as unknown
    pub fn known_height(&self) -> Option<u32> {
        self.height.filter(|h| *h > 0)
    }

    /// Check if the variant is audio without video
    pub fn is_audio_only(&self) -> bool {
        self.has_audio && !self.has_video
    }

    /// Declared size with missing sizes counted as zero
    pub fn size_or_zero(&self) -> u64 {
        self.file_size.unwrap_or(0)
    }
}

/// Metadata for a single media item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Item title
    pub title: String,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Encoding variants offered by the source
    pub formats: Vec<FormatDescriptor>,
}

/// Playlist entry as listed by the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Item URL
    pub url: String,
    /// Item title
    pub title: String,
}

impl PlaylistEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Playlist title with its entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistListing {
    pub title: String,
    pub entries: Vec<PlaylistEntry>,
}

/// Per-item estimate shown before downloading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Item title
    pub title: String,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Combined video and audio size; zero means unknown
    pub total_size_bytes: u64,
    /// Resolution that will be fetched (e.g., "720p")
    pub chosen_resolution_label: String,
    /// Every resolution the source offers, ascending
    pub available_resolution_labels: Vec<String>,
}

impl SelectionResult {
    /// Check if the source declared any size for the chosen formats
    pub fn size_known(&self) -> bool {
        self.total_size_bytes > 0
    }

    /// Height encoded in the chosen resolution label
    pub fn chosen_height(&self) -> Option<u32> {
        self.chosen_resolution_label
            .parse::<Resolution>()
            .ok()
            .map(|r| r.height())
    }
}

/// Playlist item that could not be inspected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub title: String,
    pub source_url: String,
    pub reason: String,
}

/// Aggregated estimate for a playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Playlist title
    pub title: String,
    /// Inspected items in playlist order
    pub items: Vec<SelectionResult>,
    /// Items that failed inspection
    pub skipped: Vec<SkippedItem>,
    /// Sum of item sizes
    pub total_size_bytes: u64,
    /// Sum of item durations
    pub total_duration_seconds: f64,
}

impl PlaylistSummary {
    /// Build a summary, deriving the totals from the items
    pub fn new(title: String, items: Vec<SelectionResult>, skipped: Vec<SkippedItem>) -> Self {
        let total_size_bytes = items.iter().map(|i| i.total_size_bytes).sum();
        let total_duration_seconds = items.iter().map(|i| i.duration_seconds).sum();
        Self {
            title,
            items,
            skipped,
            total_size_bytes,
            total_duration_seconds,
        }
    }

    /// Number of items that will be downloaded
    pub fn video_count(&self) -> usize {
        self.items.len()
    }
}

/// Target vertical resolution parsed from a label like "720p"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution(u32);

impl Resolution {
    pub fn new(height: u32) -> Result<Self, VgetError> {
        if height == 0 {
            return Err(VgetError::InvalidResolution(
                "height must be positive".to_string(),
            ));
        }
        Ok(Self(height))
    }

    pub fn height(&self) -> u32 {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self(1080)
    }
}

impl FromStr for Resolution {
    type Err = VgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = RESOLUTION_RE
            .captures(trimmed)
            .ok_or_else(|| VgetError::InvalidResolution(s.to_string()))?;
        let height = caps[1]
            .parse::<u32>()
            .map_err(|_| VgetError::InvalidResolution(s.to_string()))?;
        Self::new(height).map_err(|_| VgetError::InvalidResolution(s.to_string()))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.0)
    }
}

/// Render a height as a resolution label
pub fn resolution_label(height: u32) -> String {
    format!("{}p", height)
}
