//! Output formatting and progress display

use crate::cli::args::VerbosityLevel;
use crate::core::downloader::Inspection;
use crate::core::progress::{format_duration, format_estimate, format_minutes, Progress};
use crate::core::video_info::{PlaylistSummary, SelectionResult};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {bytes} {msg}";

/// Output formatter for vget
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            progress_bar: Mutex::new(None),
        }
    }

    fn is_quiet(&self) -> bool {
        self.verbosity == VerbosityLevel::Quiet
    }

    /// Print the estimate for a video or playlist
    pub fn print_inspection(&self, inspection: &Inspection) {
        match inspection {
            Inspection::Video(result) => self.print_selection(result),
            Inspection::Playlist(summary) => self.print_playlist_summary(summary),
        }
    }

    /// Print the estimate for a single video
    pub fn print_selection(&self, result: &SelectionResult) {
        if self.is_quiet() {
            return;
        }

        println!("\n{}", "Video Information:".bold());
        for line in selection_lines(result) {
            println!("{}", line);
        }
    }

    /// Print the aggregated estimate for a playlist
    pub fn print_playlist_summary(&self, summary: &PlaylistSummary) {
        if self.is_quiet() {
            return;
        }

        println!("\n{}", "Playlist Information:".bold());
        for line in playlist_lines(summary) {
            println!("{}", line);
        }

        if !summary.skipped.is_empty() {
            println!("\n{}", "Skipped Videos:".yellow());
            for skipped in &summary.skipped {
                println!("- {}: {}", skipped.title, skipped.reason);
            }
        }
    }

    /// Report playlist analysis progress on a single line
    pub fn print_analysis_progress(&self, done: usize, total: usize) {
        if self.is_quiet() {
            return;
        }

        if done == 1 {
            println!("\nAnalyzing playlist videos...");
        }
        print!("\rAnalyzed {}/{} videos...", done, total);
        std::io::stdout().flush().ok();
        if done == total {
            println!("\nPlaylist analysis completed.");
        }
    }

    /// Print an estimate as JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> crate::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Update progress bar, creating it on the first event
    pub fn update_progress(&self, progress: &Progress) {
        if self.is_quiet() {
            return;
        }

        let Ok(mut slot) = self.progress_bar.lock() else {
            return;
        };
        let bar = slot.get_or_insert_with(|| {
            let bar = ProgressBar::new(0);
            bar.set_style(spinner_style());
            bar
        });

        match progress.total_bytes {
            Some(total) if total > 0 => {
                if bar.length() != Some(total) {
                    bar.set_style(bar_style());
                    bar.set_length(total);
                }
            }
            _ => bar.set_style(spinner_style()),
        }

        bar.set_position(progress.downloaded_bytes);
        bar.set_message(progress_message(progress));
    }

    /// Finish progress bar
    pub fn finish_progress(&self, message: &str) {
        if let Ok(mut slot) = self.progress_bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_with_message(message.to_string());
            }
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("{}", message.red());
    }

    /// Print download complete message
    pub fn print_download_complete(&self, output_path: &Path, duration: Duration) {
        if self.is_quiet() {
            return;
        }

        println!();
        println!("✅ {}", "Download completed!".green());
        println!("💾 Files saved in: {}", output_path.display());
        println!("⏱️  Time: {}", format_duration(duration));
    }
}

/// Create a progress callback for the downloader
pub fn create_progress_callback(
    formatter: Arc<OutputFormatter>,
) -> impl Fn(Progress) + Send + Sync + 'static {
    move |progress: Progress| {
        formatter.update_progress(&progress);
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Status text next to the bar: file name, percentage, then speed
fn progress_message(progress: &Progress) -> String {
    let speed = match progress.percent() {
        Some(percent) => format!("{:.1}% | {}", percent, progress.speed_string()),
        None => progress.speed_string(),
    };
    match progress.short_filename() {
        Some(name) => format!("[{}] {}", name, speed),
        None => speed,
    }
}

fn selection_lines(result: &SelectionResult) -> Vec<String> {
    vec![
        format!("Title: {}", result.title),
        format!("Selected Resolution: {}", result.chosen_resolution_label),
        format!(
            "Available Resolutions: {}",
            result.available_resolution_labels.join(", ")
        ),
        format!("Duration: {}", format_minutes(result.duration_seconds)),
        format!("Estimated size: {}", format_estimate(result.total_size_bytes)),
    ]
}

fn playlist_lines(summary: &PlaylistSummary) -> Vec<String> {
    vec![
        format!("Title: {}", summary.title),
        format!("Available videos: {}", summary.video_count()),
        format!("Skipped videos: {}", summary.skipped.len()),
        format!(
            "Total duration: {}",
            format_minutes(summary.total_duration_seconds)
        ),
        format!(
            "Estimated total size: {}",
            format_estimate(summary.total_size_bytes)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::video_info::SkippedItem;

    fn selection(size: u64) -> SelectionResult {
        SelectionResult {
            title: "Clip".to_string(),
            duration_seconds: 90.0,
            total_size_bytes: size,
            chosen_resolution_label: "720p".to_string(),
            available_resolution_labels: vec!["360p".to_string(), "720p".to_string()],
        }
    }

    #[test]
    fn test_selection_lines() {
        let lines = selection_lines(&selection(520_000_000));
        assert_eq!(lines[0], "Title: Clip");
        assert_eq!(lines[1], "Selected Resolution: 720p");
        assert_eq!(lines[2], "Available Resolutions: 360p, 720p");
        assert_eq!(lines[3], "Duration: 1.5 minutes");
        assert_eq!(lines[4], "Estimated size: 495.9 MB");
    }

    #[test]
    fn test_unknown_size() {
        let lines = selection_lines(&selection(0));
        assert_eq!(lines[4], "Estimated size: Unknown");
    }

    #[test]
    fn test_playlist_lines() {
        let summary = PlaylistSummary::new(
            "Course".to_string(),
            vec![selection(1024), selection(0)],
            vec![SkippedItem {
                title: "Gone".to_string(),
                source_url: "https://v/3".to_string(),
                reason: "Failed to get info: Private video".to_string(),
            }],
        );

        let lines = playlist_lines(&summary);
        assert_eq!(lines[0], "Title: Course");
        assert_eq!(lines[1], "Available videos: 2");
        assert_eq!(lines[2], "Skipped videos: 1");
        assert_eq!(lines[3], "Total duration: 3.0 minutes");
        assert_eq!(lines[4], "Estimated total size: 1.0 KB");
    }

    #[test]
    fn test_progress_message() {
        let mut progress = Progress::downloading(10, None);
        assert_eq!(progress_message(&progress), "Unknown");

        progress.speed = Some(2048.0);
        progress.filename = Some("/tmp/out/Clip_20240101_120000.mp4".to_string());
        assert_eq!(
            progress_message(&progress),
            "[Clip_20240101_120000.mp4] 2.0 KB/s"
        );

        progress.total_bytes = Some(40);
        assert_eq!(
            progress_message(&progress),
            "[Clip_20240101_120000.mp4] 25.0% | 2.0 KB/s"
        );
    }

    #[test]
    fn test_quiet_mode_creates_no_bar() {
        let formatter = OutputFormatter::new(VerbosityLevel::Quiet);
        formatter.update_progress(&Progress::downloading(10, Some(100)));
        assert!(formatter.progress_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_progress_bar_lifecycle() {
        let formatter = Arc::new(OutputFormatter::new(VerbosityLevel::Normal));
        let callback = create_progress_callback(formatter.clone());

        callback(Progress::downloading(10, None));
        callback(Progress::downloading(50, Some(100)));
        {
            let slot = formatter.progress_bar.lock().unwrap();
            let bar = slot.as_ref().unwrap();
            assert_eq!(bar.length(), Some(100));
            assert_eq!(bar.position(), 50);
        }

        formatter.finish_progress("done");
        assert!(formatter.progress_bar.lock().unwrap().is_none());
        formatter.finish_progress("again");
    }

    #[test]
    fn test_print_analysis_progress() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        // Should not panic
        for done in 1..=3 {
            formatter.print_analysis_progress(done, 3);
        }
        OutputFormatter::new(VerbosityLevel::Quiet).print_analysis_progress(1, 1);
    }

    #[test]
    fn test_print_json() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        formatter
            .print_json(&Inspection::Video(selection(1)))
            .unwrap();
    }
}
