//! In-memory collaborators for unit tests

use crate::core::progress::{Progress, ProgressCallback};
use crate::core::video_info::{FormatDescriptor, ItemInfo, PlaylistEntry, PlaylistListing};
use crate::download::DownloadRequest;
use crate::error::VgetError;
use crate::platform::traits::{DownloadExecutor, MetadataProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeProvider {
    items: HashMap<String, Result<ItemInfo, String>>,
    playlists: HashMap<String, PlaylistListing>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(
        mut self,
        url: &str,
        title: &str,
        duration_seconds: f64,
        formats: Vec<FormatDescriptor>,
    ) -> Self {
        self.items.insert(
            url.to_string(),
            Ok(ItemInfo {
                title: title.to_string(),
                duration_seconds,
                formats,
            }),
        );
        self
    }

    pub fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.items.insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_playlist(mut self, url: &str, title: &str, entries: Vec<PlaylistEntry>) -> Self {
        self.playlists.insert(
            url.to_string(),
            PlaylistListing {
                title: title.to_string(),
                entries,
            },
        );
        self
    }
}

#[async_trait]
impl MetadataProvider for FakeProvider {
    async fn fetch_item_info(&self, url: &str) -> Result<ItemInfo, VgetError> {
        match self.items.get(url) {
            Some(Ok(info)) => Ok(info.clone()),
            Some(Err(message)) => Err(VgetError::Fetch(message.clone())),
            None => Err(VgetError::Fetch(format!("unknown url {}", url))),
        }
    }

    async fn fetch_playlist_entries(&self, url: &str) -> Result<PlaylistListing, VgetError> {
        self.playlists
            .get(url)
            .cloned()
            .ok_or_else(|| VgetError::Fetch("No videos found in playlist".to_string()))
    }
}

/// Records requests and replays scripted progress events
#[derive(Default)]
pub struct RecordingExecutor {
    pub requests: Mutex<Vec<DownloadRequest>>,
    pub events: Vec<Progress>,
    pub failure: Option<String>,
}

impl RecordingExecutor {
    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn last_request(&self) -> Option<DownloadRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }
}

#[async_trait]
impl DownloadExecutor for RecordingExecutor {
    async fn download(
        &self,
        request: &DownloadRequest,
        progress: Option<ProgressCallback>,
    ) -> Result<(), VgetError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(callback) = progress {
            for event in &self.events {
                callback(event.clone());
            }
        }
        match &self.failure {
            Some(message) => Err(VgetError::Download(message.clone())),
            None => Ok(()),
        }
    }
}
