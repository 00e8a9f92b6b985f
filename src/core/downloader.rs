//! Inspect, confirm and download workflow

use crate::core::aggregator::PlaylistAggregator;
use crate::core::confirm::Confirm;
use crate::core::progress::{Progress, ProgressCallback};
use crate::core::selector::ResolutionPolicy;
use crate::core::video_info::{PlaylistSummary, Resolution, SelectionResult};
use crate::download::{DownloadRequest, OutputTemplate, ResolutionConstraint};
use crate::error::VgetError;
use crate::platform::traits::{DownloadExecutor, MetadataProvider};
use crate::utils::is_playlist_url;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Main downloader configuration
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Target resolution
    pub resolution: Resolution,
    /// How the target is matched against available heights
    pub policy: ResolutionPolicy,
    /// Directory downloads land in
    pub output_path: PathBuf,
    /// Treat every URL as a playlist
    pub force_playlist: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            policy: ResolutionPolicy::default(),
            output_path: PathBuf::from("."),
            force_playlist: false,
        }
    }
}

/// Estimate presented before downloading
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Inspection {
    Video(SelectionResult),
    Playlist(PlaylistSummary),
}

impl Inspection {
    pub fn is_playlist(&self) -> bool {
        matches!(self, Inspection::Playlist(_))
    }
}

/// Outcome of a finished download
#[derive(Debug, Clone)]
pub struct DownloadReport {
    /// Directory the files were written to
    pub destination: PathBuf,
    /// Wall time spent in the executor
    pub elapsed: Duration,
}

/// Orchestrates metadata retrieval, selection and download
pub struct Downloader<P, E> {
    options: DownloadOptions,
    provider: P,
    executor: E,
    progress: Option<ProgressCallback>,
}

impl<P: MetadataProvider, E: DownloadExecutor> Downloader<P, E> {
    /// Create a new downloader with default options
    pub fn new(provider: P, executor: E) -> Self {
        Self {
            options: DownloadOptions::default(),
            provider,
            executor,
            progress: None,
        }
    }

    /// Set target resolution
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.options.resolution = resolution;
        self
    }

    /// Set resolution policy
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    /// Set output directory
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output_path = path.into();
        self
    }

    /// Treat every URL as a playlist
    pub fn with_playlist(mut self, force: bool) -> Self {
        self.options.force_playlist = force;
        self
    }

    /// Set progress callback
    pub fn with_progress(mut self, callback: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Check if the URL is handled as a playlist
    pub fn is_playlist(&self, url: &str) -> bool {
        self.options.force_playlist || is_playlist_url(url)
    }

    /// Estimate a single video
    pub async fn inspect_video(&self, url: &str) -> Result<SelectionResult, VgetError> {
        info!("Inspecting video {}", url);
        self.aggregator().inspect_item(url).await
    }

    /// Estimate every item of a playlist
    pub async fn inspect_playlist(
        &self,
        url: &str,
        on_item: impl FnMut(usize, usize),
    ) -> Result<PlaylistSummary, VgetError> {
        info!("Inspecting playlist {}", url);
        let listing = self.provider.fetch_playlist_entries(url).await?;
        debug!("Playlist '{}' has {} entries", listing.title, listing.entries.len());
        self.aggregator()
            .aggregate(&listing.title, &listing.entries, on_item)
            .await
    }

    /// Estimate a video or playlist, depending on the URL
    pub async fn inspect(
        &self,
        url: &str,
        on_item: impl FnMut(usize, usize),
    ) -> Result<Inspection, VgetError> {
        if self.is_playlist(url) {
            self.inspect_playlist(url, on_item).await.map(Inspection::Playlist)
        } else {
            self.inspect_video(url).await.map(Inspection::Video)
        }
    }

    /// Download what an inspection described
    pub async fn download(
        &self,
        url: &str,
        inspection: &Inspection,
    ) -> Result<DownloadReport, VgetError> {
        let destination = self.options.output_path.clone();
        tokio::fs::create_dir_all(&destination).await?;

        let request = DownloadRequest {
            url: url.to_string(),
            template: OutputTemplate::new(&destination),
            constraint: self.constraint_for(inspection),
            playlist: inspection.is_playlist(),
            destination: destination.clone(),
        };
        info!(
            "Downloading {} into {} (height <= {})",
            url,
            destination.display(),
            request.constraint.max_height
        );

        let start = Instant::now();
        self.executor.download(&request, self.progress.clone()).await?;

        Ok(DownloadReport {
            destination,
            elapsed: start.elapsed(),
        })
    }

    /// Inspect, present, confirm, then download
    ///
    /// Returns [`VgetError::UserCancelled`] without touching the executor when
    /// the confirmation is declined.
    pub async fn run<C: Confirm>(
        &self,
        url: &str,
        confirm: &mut C,
        on_item: impl FnMut(usize, usize),
        present: impl FnOnce(&Inspection),
    ) -> Result<DownloadReport, VgetError> {
        let inspection = self.inspect(url, on_item).await?;
        present(&inspection);

        if !confirm.confirm()? {
            info!("Download declined for {}", url);
            return Err(VgetError::UserCancelled);
        }

        self.download(url, &inspection).await
    }

    fn aggregator(&self) -> PlaylistAggregator<'_, P> {
        PlaylistAggregator::new(
            &self.provider,
            self.options.resolution.height(),
            self.options.policy,
        )
    }

    /// Single videos use the height actually chosen so a fallback above the
    /// target is honoured; playlists use the requested height.
    fn constraint_for(&self, inspection: &Inspection) -> ResolutionConstraint {
        let requested = self.options.resolution.height();
        match inspection {
            Inspection::Video(result) => {
                ResolutionConstraint::new(result.chosen_height().unwrap_or(requested))
            }
            Inspection::Playlist(_) => ResolutionConstraint::new(requested),
        }
    }
}
