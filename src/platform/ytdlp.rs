//! Metadata extraction through the `yt-dlp` binary

use crate::core::video_info::{FormatDescriptor, ItemInfo, PlaylistEntry, PlaylistListing};
use crate::error::VgetError;
use crate::platform::traits::MetadataProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// Default binary name looked up on `PATH`
pub const YTDLP_BIN: &str = if cfg!(target_os = "windows") {
    "yt-dlp.exe"
} else {
    "yt-dlp"
};

/// Handle to a `yt-dlp` installation
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    socket_timeout: Duration,
}

impl YtDlp {
    /// Use the given binary
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            socket_timeout: Duration::from_secs(30),
        }
    }

    /// Set socket timeout used for metadata requests
    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = timeout;
        self
    }

    /// Path of the binary this handle runs
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Resolve the binary and check that it runs
    pub async fn locate(explicit: Option<PathBuf>) -> Result<Self, VgetError> {
        let ytdlp = Self::new(explicit.unwrap_or_else(|| PathBuf::from(YTDLP_BIN)));
        let version = ytdlp.version().await?;
        info!("Using yt-dlp {} at {}", version, ytdlp.binary.display());
        Ok(ytdlp)
    }

    /// Installed `yt-dlp` version
    pub async fn version(&self) -> Result<String, VgetError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                VgetError::Fetch(format!(
                    "yt-dlp not found at {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(VgetError::Fetch(format!(
                "yt-dlp --version exited with {}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run yt-dlp with the given arguments and return stdout
    async fn run_json(&self, args: &[String]) -> Result<Vec<u8>, VgetError> {
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| VgetError::Fetch(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VgetError::Fetch(last_error_line(&stderr).unwrap_or_else(|| {
                format!("yt-dlp exited with {}", output.status)
            })));
        }

        Ok(output.stdout)
    }

    fn base_args(&self) -> Vec<String> {
        vec![
            "--dump-single-json".to_string(),
            "--no-warnings".to_string(),
            "--quiet".to_string(),
            "--socket-timeout".to_string(),
            self.socket_timeout.as_secs().max(1).to_string(),
        ]
    }

    fn item_args(&self, url: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.push("--no-playlist".to_string());
        args.push(url.to_string());
        args
    }

    fn playlist_args(&self, url: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.push("--flat-playlist".to_string());
        args.push("--yes-playlist".to_string());
        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl MetadataProvider for YtDlp {
    async fn fetch_item_info(&self, url: &str) -> Result<ItemInfo, VgetError> {
        let stdout = self.run_json(&self.item_args(url)).await?;
        parse_item_info(&stdout)
    }

    async fn fetch_playlist_entries(&self, url: &str) -> Result<PlaylistListing, VgetError> {
        let stdout = self.run_json(&self.playlist_args(url)).await?;
        parse_playlist(&stdout)
    }
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    title: Option<String>,
    duration: Option<f64>,
    formats: Option<Vec<RawFormat>>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: Option<String>,
    ext: Option<String>,
    height: Option<f64>,
    vcodec: Option<String>,
    acodec: Option<String>,
    filesize: Option<f64>,
    filesize_approx: Option<f64>,
}

impl From<RawFormat> for FormatDescriptor {
    fn from(raw: RawFormat) -> Self {
        let file_size = raw
            .filesize
            .or(raw.filesize_approx)
            .filter(|size| *size >= 0.0)
            .map(|size| size as u64);

        FormatDescriptor {
            format_id: raw.format_id,
            ext: raw.ext,
            height: raw.height.filter(|h| *h >= 0.0).map(|h| h as u32),
            has_video: raw.vcodec.as_deref() != Some("none"),
            has_audio: raw.acodec.as_deref() != Some("none"),
            file_size,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPlaylist {
    title: Option<String>,
    entries: Option<Vec<Option<RawEntry>>>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    url: Option<String>,
    webpage_url: Option<String>,
    title: Option<String>,
}

/// Parse `--dump-single-json` output for one item
pub fn parse_item_info(stdout: &[u8]) -> Result<ItemInfo, VgetError> {
    let raw: RawInfo = serde_json::from_slice(stdout)?;
    Ok(ItemInfo {
        title: raw.title.unwrap_or_else(|| "Unknown Title".to_string()),
        duration_seconds: raw.duration.unwrap_or(0.0).max(0.0),
        formats: raw
            .formats
            .unwrap_or_default()
            .into_iter()
            .map(FormatDescriptor::from)
            .collect(),
    })
}

/// Parse flat `--dump-single-json` output for a playlist
pub fn parse_playlist(stdout: &[u8]) -> Result<PlaylistListing, VgetError> {
    let raw: RawPlaylist = serde_json::from_slice(stdout)?;

    let entries: Vec<PlaylistEntry> = raw
        .entries
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let url = entry.url.or(entry.webpage_url)?;
            Some(PlaylistEntry::new(
                url,
                entry.title.unwrap_or_else(|| "Unknown Title".to_string()),
            ))
        })
        .collect();

    if entries.is_empty() {
        return Err(VgetError::Fetch("No videos found in playlist".to_string()));
    }

    Ok(PlaylistListing {
        title: raw.title.unwrap_or_else(|| "Unknown Playlist".to_string()),
        entries,
    })
}

/// Last `ERROR:` line yt-dlp printed, or the last non-empty line
pub(crate) fn last_error_line(stderr: &str) -> Option<String> {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    lines
        .iter()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.trim_start_matches("ERROR:").trim().to_string())
}
