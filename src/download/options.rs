//! Transfer tuning forwarded to the download tool

use std::time::Duration;

/// Fragment, buffer and retry settings
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTuning {
    /// Fragments fetched in parallel
    pub concurrent_fragments: u32,
    /// Download buffer size in bytes
    pub buffer_size: u64,
    /// HTTP chunk size in bytes
    pub http_chunk_size: u64,
    /// Retries for the whole transfer
    pub retries: u32,
    /// Retries per fragment
    pub fragment_retries: u32,
    /// Retries for file access errors
    pub file_access_retries: u32,
    /// Pause between retries
    pub retry_sleep: Duration,
    /// Socket timeout
    pub socket_timeout: Duration,
    /// Container the result is merged and converted into
    pub container: String,
}

impl Default for DownloadTuning {
    fn default() -> Self {
        Self {
            concurrent_fragments: 16,
            buffer_size: 1024 * 1024,
            http_chunk_size: 10 * 1024 * 1024,
            retries: 10,
            fragment_retries: 10,
            file_access_retries: 5,
            retry_sleep: Duration::from_secs(5),
            socket_timeout: Duration::from_secs(30),
            container: "mp4".to_string(),
        }
    }
}

impl DownloadTuning {
    /// Set retries for transfer and fragments
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self.fragment_retries = retries;
        self
    }

    /// Set parallel fragment count
    pub fn with_concurrent_fragments(mut self, fragments: u32) -> Self {
        self.concurrent_fragments = fragments.max(1);
        self
    }

    /// Set socket timeout
    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = timeout;
        self
    }

    /// Command-line flags for yt-dlp
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "--merge-output-format".to_string(),
            self.container.clone(),
            "--recode-video".to_string(),
            self.container.clone(),
            "--concurrent-fragments".to_string(),
            self.concurrent_fragments.to_string(),
            "--buffer-size".to_string(),
            self.buffer_size.to_string(),
            "--http-chunk-size".to_string(),
            self.http_chunk_size.to_string(),
            "--retries".to_string(),
            self.retries.to_string(),
            "--fragment-retries".to_string(),
            self.fragment_retries.to_string(),
            "--file-access-retries".to_string(),
            self.file_access_retries.to_string(),
            "--retry-sleep".to_string(),
            self.retry_sleep.as_secs().to_string(),
            "--socket-timeout".to_string(),
            self.socket_timeout.as_secs().max(1).to_string(),
        ]
    }
}
