//! Playlist inspection with per-item error tolerance

use crate::core::selector::{summarize, ResolutionPolicy};
use crate::core::video_info::{PlaylistEntry, PlaylistSummary, SelectionResult, SkippedItem};
use crate::error::VgetError;
use crate::platform::traits::MetadataProvider;
use tracing::{debug, warn};

/// Runs metadata retrieval and format selection across playlist items
pub struct PlaylistAggregator<'a, P: MetadataProvider + ?Sized> {
    provider: &'a P,
    target_height: u32,
    policy: ResolutionPolicy,
}

impl<'a, P: MetadataProvider + ?Sized> PlaylistAggregator<'a, P> {
    pub fn new(provider: &'a P, target_height: u32, policy: ResolutionPolicy) -> Self {
        Self {
            provider,
            target_height,
            policy,
        }
    }

    /// Fetch one item's metadata and pick its formats
    pub async fn inspect_item(&self, url: &str) -> Result<SelectionResult, VgetError> {
        let info = self.provider.fetch_item_info(url).await?;
        debug!("{}: {} formats", info.title, info.formats.len());
        summarize(&info, self.target_height, self.policy)
    }

    /// Inspect every entry in order, recording failures as skipped items
    ///
    /// `on_progress` receives `(processed, total)` after each entry.
    pub async fn aggregate(
        &self,
        title: &str,
        entries: &[PlaylistEntry],
        mut on_progress: impl FnMut(usize, usize),
    ) -> Result<PlaylistSummary, VgetError> {
        if entries.is_empty() {
            return Err(VgetError::EmptyPlaylist);
        }

        let total = entries.len();
        let mut items = Vec::with_capacity(total);
        let mut skipped = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match self.inspect_item(&entry.url).await {
                Ok(result) => items.push(result),
                Err(e) => {
                    warn!("Skipping video '{}': {}", entry.title, e);
                    skipped.push(SkippedItem {
                        title: entry.title.clone(),
                        source_url: entry.url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            on_progress(index + 1, total);
        }

        Ok(PlaylistSummary::new(title.to_string(), items, skipped))
    }
}
