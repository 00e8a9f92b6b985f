//! Output file naming

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Timestamp layout appended to every file name
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// yt-dlp output template: `<dir>/<title>_<timestamp>.<ext>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    directory: PathBuf,
    timestamp: String,
}

impl OutputTemplate {
    /// Template stamped with the current local time
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::at(directory, Local::now())
    }

    /// Template stamped with the given time
    pub fn at(directory: impl Into<PathBuf>, time: DateTime<Local>) -> Self {
        Self {
            directory: directory.into(),
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Render the template string passed to `-o`
    pub fn render(&self) -> String {
        // `%` is the field marker in yt-dlp templates
        let dir = self.directory.to_string_lossy().replace('%', "%%");
        let file = format!("%(title)s_{}.%(ext)s", self.timestamp);
        Path::new(&dir).join(file).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn test_render_template() {
        let template = OutputTemplate::at("/data/videos", fixed_time());
        assert_eq!(template.timestamp(), "20240309_070501");
        assert_eq!(
            template.render(),
            Path::new("/data/videos")
                .join("%(title)s_20240309_070501.%(ext)s")
                .to_string_lossy()
        );
    }

    #[test]
    fn test_render_escapes_percent_in_directory() {
        let template = OutputTemplate::at("/tmp/100%", fixed_time());
        assert!(template.render().starts_with("/tmp/100%%"));
        assert_eq!(template.directory(), Path::new("/tmp/100%"));
    }

    #[test]
    fn test_new_uses_timestamp_layout() {
        let template = OutputTemplate::new(".");
        assert_eq!(template.timestamp().len(), 15);
        assert_eq!(&template.timestamp()[8..9], "_");
    }
}
