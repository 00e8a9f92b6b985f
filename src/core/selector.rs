//! Resolution and format selection

use crate::core::video_info::{resolution_label, FormatDescriptor, ItemInfo, SelectionResult};
use crate::error::VgetError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How the target height is matched against what the source offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionPolicy {
    /// Largest height not above the target; fail if there is none
    Strict,
    /// Largest height not above the target, else the smallest available
    #[default]
    ClosestFit,
}

/// Formats picked for one media item
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// Chosen video format
    pub video: &'a FormatDescriptor,
    /// Best audio-only format, if the source has one
    pub audio: Option<&'a FormatDescriptor>,
    /// Height of the chosen video format
    pub chosen_height: u32,
    /// Distinct video heights, ascending
    pub available_heights: Vec<u32>,
}

impl Selection<'_> {
    /// Video plus audio size; missing sizes count as zero
    pub fn total_size(&self) -> u64 {
        self.video.size_or_zero() + self.audio.map_or(0, FormatDescriptor::size_or_zero)
    }
}

/// Pick a video and an audio format for the target height
pub fn select(
    formats: &[FormatDescriptor],
    target_height: u32,
    policy: ResolutionPolicy,
) -> Result<Selection<'_>, VgetError> {
    if formats.is_empty() {
        return Err(VgetError::NoFormatsAvailable);
    }

    let available_heights = video_heights(formats);
    if available_heights.is_empty() {
        let any_heights: Vec<u32> = formats
            .iter()
            .filter_map(FormatDescriptor::known_height)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let suggested = suggest_height(&any_heights, target_height);
        return Err(VgetError::NoVideoFormatFound {
            requested: target_height,
            available: any_heights,
            suggested,
        });
    }

    let at_or_below = available_heights
        .iter()
        .rev()
        .find(|h| **h <= target_height)
        .copied();

    let video = match policy {
        ResolutionPolicy::Strict => at_or_below.and_then(|height| {
            formats
                .iter()
                .find(|f| f.has_video && f.known_height() == Some(height))
        }),
        ResolutionPolicy::ClosestFit => {
            let height = at_or_below.unwrap_or(available_heights[0]);
            largest_by_size(
                formats
                    .iter()
                    .filter(|f| f.has_video && f.known_height() == Some(height)),
            )
        }
    };

    let Some(video) = video else {
        return Err(VgetError::NoVideoFormatFound {
            requested: target_height,
            suggested: suggest_height(&available_heights, target_height),
            available: available_heights,
        });
    };

    let audio = largest_by_size(formats.iter().filter(|f| f.is_audio_only()));

    Ok(Selection {
        video,
        audio,
        chosen_height: video.known_height().unwrap_or_default(),
        available_heights,
    })
}

/// Build the per-item estimate from fetched metadata
pub fn summarize(
    info: &ItemInfo,
    target_height: u32,
    policy: ResolutionPolicy,
) -> Result<SelectionResult, VgetError> {
    let selection = select(&info.formats, target_height, policy)?;

    Ok(SelectionResult {
        title: info.title.clone(),
        duration_seconds: info.duration_seconds.max(0.0),
        total_size_bytes: selection.total_size(),
        chosen_resolution_label: resolution_label(selection.chosen_height),
        available_resolution_labels: selection
            .available_heights
            .iter()
            .map(|h| resolution_label(*h))
            .collect(),
    })
}

/// Distinct heights of video-capable formats, ascending
fn video_heights(formats: &[FormatDescriptor]) -> Vec<u32> {
    formats
        .iter()
        .filter(|f| f.has_video)
        .filter_map(FormatDescriptor::known_height)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Largest height not above the target, else the smallest one
fn suggest_height(sorted_heights: &[u32], target_height: u32) -> Option<u32> {
    sorted_heights
        .iter()
        .rev()
        .find(|h| **h <= target_height)
        .or_else(|| sorted_heights.first())
        .copied()
}

/// Largest declared size; the first encountered wins ties
fn largest_by_size<'a>(
    formats: impl Iterator<Item = &'a FormatDescriptor>,
) -> Option<&'a FormatDescriptor> {
    formats.fold(None, |best, f| match best {
        Some(b) if b.size_or_zero() >= f.size_or_zero() => Some(b),
        _ => Some(f),
    })
}
