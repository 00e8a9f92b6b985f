//! Seams to the external extraction and download tool

use crate::core::progress::ProgressCallback;
use crate::core::video_info::{ItemInfo, PlaylistListing};
use crate::download::DownloadRequest;
use crate::error::VgetError;
use async_trait::async_trait;

/// Supplies metadata for media items and playlists
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Title, duration and formats of a single item
    async fn fetch_item_info(&self, url: &str) -> Result<ItemInfo, VgetError>;

    /// Playlist title and entries; fails when no usable entry exists
    async fn fetch_playlist_entries(&self, url: &str) -> Result<PlaylistListing, VgetError>;
}

/// Performs the actual transfer and container conversion
#[async_trait]
pub trait DownloadExecutor: Send + Sync {
    async fn download(
        &self,
        request: &DownloadRequest,
        progress: Option<ProgressCallback>,
    ) -> Result<(), VgetError>;
}
