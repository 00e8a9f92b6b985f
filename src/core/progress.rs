//! Progress events reported while a download runs

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Callback receiving progress events
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Transfer state reported by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    Downloading,
    Finished,
}

/// Progress information for a download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Transfer state
    pub status: ProgressStatus,
    /// Number of bytes downloaded
    pub downloaded_bytes: u64,
    /// Total size in bytes, exact or estimated
    pub total_bytes: Option<u64>,
    /// Current download speed in bytes per second
    pub speed: Option<f64>,
    /// Estimated time remaining
    pub eta: Option<Duration>,
    /// File being written, for playlist downloads
    pub filename: Option<String>,
}

impl Progress {
    /// Create a progress event for an in-flight transfer
    pub fn downloading(downloaded_bytes: u64, total_bytes: Option<u64>) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            downloaded_bytes,
            total_bytes,
            speed: None,
            eta: None,
            filename: None,
        }
    }

    /// Download progress as a percentage, when the total is known
    pub fn percent(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => {
                Some((self.downloaded_bytes as f64 / total as f64 * 100.0).min(100.0))
            }
            _ => None,
        }
    }

    /// Get human-readable speed string
    pub fn speed_string(&self) -> String {
        match self.speed {
            Some(speed) => format_bytes_per_second(speed),
            None => "Unknown".to_string(),
        }
    }

    /// Short file name without its directory
    pub fn short_filename(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name))
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}

/// Format bytes per second as human-readable string
pub fn format_bytes_per_second(bytes_per_second: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_second.max(0.0) as u64))
}

/// Estimated size, or "Unknown" when nothing was declared
pub fn format_estimate(bytes: u64) -> String {
    if bytes > 0 {
        format_bytes(bytes)
    } else {
        "Unknown".to_string()
    }
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    if total_seconds < 60 {
        format!("{}s", total_seconds)
    } else if total_seconds < 3600 {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        if seconds == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m {}s", minutes, seconds)
        }
    } else {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        if minutes == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, minutes)
        }
    }
}

/// Render a duration in seconds as minutes with one decimal
pub fn format_minutes(seconds: f64) -> String {
    format!("{:.1} minutes", seconds.max(0.0) / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        let progress = Progress::downloading(500, Some(1000));
        assert_eq!(progress.percent(), Some(50.0));

        let progress = Progress::downloading(1500, Some(1000));
        assert_eq!(progress.percent(), Some(100.0));
    }

    #[test]
    fn test_progress_unknown_total() {
        let progress = Progress::downloading(500, None);
        assert_eq!(progress.percent(), None);
        assert_eq!(progress.speed_string(), "Unknown");
    }

    #[test]
    fn test_short_filename() {
        let mut progress = Progress::downloading(0, None);
        assert_eq!(progress.short_filename(), None);
        progress.filename = Some("/tmp/out/Clip_20240101_120000.f137.mp4".to_string());
        assert_eq!(
            progress.short_filename(),
            Some("Clip_20240101_120000.f137.mp4")
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
        assert_eq!(format_bytes_per_second(2048.0), "2.0 KB/s");
    }

    #[test]
    fn test_format_estimate() {
        assert_eq!(format_estimate(0), "Unknown");
        assert_eq!(format_estimate(520_000_000), "495.9 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(format_duration(Duration::from_secs(3660)), "1h 1m");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0.0), "0.0 minutes");
        assert_eq!(format_minutes(90.0), "1.5 minutes");
        assert_eq!(format_minutes(-5.0), "0.0 minutes");
    }
}
