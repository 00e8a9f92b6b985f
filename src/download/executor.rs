//! Download execution through the `yt-dlp` binary

use crate::core::progress::{Progress, ProgressCallback, ProgressStatus};
use crate::download::options::DownloadTuning;
use crate::download::request::DownloadRequest;
use crate::error::VgetError;
use crate::platform::traits::DownloadExecutor;
use crate::platform::ytdlp::last_error_line;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, trace};

/// Marker that starts every progress line we ask yt-dlp to print
const PROGRESS_MARKER: &str = "vget-progress";

/// Runs `yt-dlp` to fetch and convert media
#[derive(Debug, Clone)]
pub struct YtDlpExecutor {
    binary: PathBuf,
    tuning: DownloadTuning,
}

impl YtDlpExecutor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            tuning: DownloadTuning::default(),
        }
    }

    /// Set transfer tuning
    pub fn with_tuning(mut self, tuning: DownloadTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Full argument list for one request
    pub fn build_args(&self, request: &DownloadRequest) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            request.constraint.format_expression(),
            "-o".to_string(),
            request.template.render(),
        ];
        args.extend(self.tuning.to_args());

        if request.playlist {
            args.push("--yes-playlist".to_string());
            args.push("--ignore-errors".to_string());
        } else {
            args.push("--no-playlist".to_string());
        }

        args.extend([
            "--no-warnings".to_string(),
            "--quiet".to_string(),
            "--progress".to_string(),
            "--newline".to_string(),
            "--progress-template".to_string(),
            progress_template(),
            request.url.clone(),
        ]);
        args
    }
}

#[async_trait]
impl DownloadExecutor for YtDlpExecutor {
    async fn download(
        &self,
        request: &DownloadRequest,
        progress: Option<ProgressCallback>,
    ) -> Result<(), VgetError> {
        let args = self.build_args(request);
        info!("Starting yt-dlp for {}", request.url);
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VgetError::Download(format!("failed to start yt-dlp: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| VgetError::Download("yt-dlp stdout unavailable".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| VgetError::Download("yt-dlp stderr unavailable".to_string()))?;

        let stderr_reader = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Err(e) = stderr.read_to_end(&mut buf).await {
                debug!("Failed to read yt-dlp stderr: {}", e);
            }
            buf
        });

        // File names come through in whatever encoding the platform uses
        let mut segments = BufReader::new(stdout).split(b'\n');
        while let Some(segment) = segments.next_segment().await? {
            let line = String::from_utf8_lossy(&segment);
            match parse_progress_line(&line) {
                Some(event) => {
                    if let Some(callback) = &progress {
                        callback(event);
                    }
                }
                None => trace!("yt-dlp: {}", line),
            }
        }

        let status = child.wait().await?;
        let stderr = stderr_reader.await.unwrap_or_default();
        let stderr = String::from_utf8_lossy(&stderr);

        if !status.success() {
            let cause = last_error_line(&stderr)
                .unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            return Err(VgetError::Download(cause));
        }

        info!("yt-dlp finished for {}", request.url);
        Ok(())
    }
}

/// Template making yt-dlp print one parseable line per progress update
pub fn progress_template() -> String {
    format!(
        "download:{}|%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s|%(progress.speed)s|%(progress.eta)s|%(progress.filename)s",
        PROGRESS_MARKER
    )
}

/// Parse a line produced by [`progress_template`]
pub fn parse_progress_line(line: &str) -> Option<Progress> {
    let rest = line.trim().strip_prefix(PROGRESS_MARKER)?.strip_prefix('|')?;
    // File names may contain the separator, so it is split last
    let mut fields = rest.splitn(7, '|');

    let status = match fields.next()? {
        "downloading" => ProgressStatus::Downloading,
        "finished" => ProgressStatus::Finished,
        _ => return None,
    };
    let downloaded_bytes = number(fields.next()).map(|n| n as u64).unwrap_or(0);
    let total = number(fields.next());
    let estimate = number(fields.next());
    let speed = number(fields.next());
    let eta = number(fields.next()).map(Duration::from_secs_f64);
    let filename = fields
        .next()
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != "NA")
        .map(str::to_string);

    Some(Progress {
        status,
        downloaded_bytes,
        total_bytes: total.or(estimate).map(|n| n as u64),
        speed,
        eta,
        filename,
    })
}

/// Numeric template field; yt-dlp prints `NA` for missing values
fn number(field: Option<&str>) -> Option<f64> {
    field
        .map(str::trim)
        .and_then(|f| f.parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
}
