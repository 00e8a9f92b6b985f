//! Core functionality for vget

pub mod aggregator;
pub mod confirm;
pub mod downloader;
pub mod progress;
pub mod selector;
pub mod video_info;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::*;
pub use confirm::*;
pub use downloader::*;
pub use progress::*;
pub use selector::*;
pub use video_info::*;
