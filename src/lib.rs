//! # vget - inspect, confirm, download
//!
//! Command-line video downloader built on top of `yt-dlp`.
//!
//! ## Features
//!
//! - Resolution selection with strict or closest-fit matching
//! - Size and duration estimates before anything is written
//! - Playlist aggregation that skips unavailable items
//! - Interactive confirmation
//! - MP4 output with timestamped file names
//!
//! ## Example
//!
//! ```rust,no_run
//! use vget::core::{ConfirmationGate, Downloader};
//! use vget::download::YtDlpExecutor;
//! use vget::platform::YtDlp;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ytdlp = YtDlp::locate(None).await?;
//!     let executor = YtDlpExecutor::new(ytdlp.binary());
//!     let downloader = Downloader::new(ytdlp, executor).with_output_path("./downloads");
//!
//!     let mut gate = ConfirmationGate::stdio();
//!     let report = downloader
//!         .run("VIDEO_URL", &mut gate, |_, _| {}, |inspection| println!("{:?}", inspection))
//!         .await?;
//!     println!("Saved in {}", report.destination.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use core::{
    DownloadOptions, Downloader, FormatDescriptor, Inspection, PlaylistSummary, Progress,
    Resolution, ResolutionPolicy, SelectionResult,
};
pub use error::VgetError;

/// Result type alias for vget operations
pub type Result<T> = std::result::Result<T, VgetError>;
