//! Command line argument parsing

use crate::core::selector::ResolutionPolicy;
use crate::core::video_info::Resolution;
use crate::download::DownloadTuning;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

const RESOLUTIONS_HELP: &str = "\
Common resolutions:
  1080p - Full HD
  720p  - HD
  480p  - SD
  360p  - Low
  240p  - Lower
  144p  - Lowest

Examples:
  vget https://www.youtube.com/watch?v=xxx ~/Downloads 1080p
  vget https://www.youtube.com/playlist?list=xxx ~/Downloads 720p";

/// vget - Inspect, confirm and download videos or playlists as MP4
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_long_help = RESOLUTIONS_HELP)]
pub struct Args {
    /// Video or playlist URL
    pub url: String,

    /// Directory downloads are written to
    #[arg(value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Target resolution (e.g., 1080p, 720p, 480)
    #[arg(value_name = "RESOLUTION", default_value = "1080p", value_parser = parse_resolution)]
    pub resolution: Resolution,

    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// How the target resolution is matched
    #[arg(long, value_enum, default_value = "closest-fit")]
    pub policy: PolicyArg,

    /// Treat input as playlist URL
    #[arg(long)]
    pub playlist: bool,

    /// Show the estimate and exit without downloading
    #[arg(short, long)]
    pub simulate: bool,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to the yt-dlp executable
    #[arg(long, value_name = "PATH", env = "VGET_YTDLP")]
    pub ytdlp: Option<PathBuf>,

    /// Socket timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub socket_timeout: humantime::Duration,

    /// Retries for transfers and fragments
    #[arg(long, default_value = "10")]
    pub retries: u32,

    /// Fragments downloaded in parallel
    #[arg(long, default_value = "16")]
    pub concurrent_fragments: u32,

    /// Disable progress output
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors and the prompt)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Resolution policy
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PolicyArg {
    /// Fail when nothing at or below the target exists
    Strict,
    /// Fall back to the smallest available resolution
    ClosestFit,
}

impl From<PolicyArg> for ResolutionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => ResolutionPolicy::Strict,
            PolicyArg::ClosestFit => ResolutionPolicy::ClosestFit,
        }
    }
}

fn parse_resolution(value: &str) -> Result<Resolution, String> {
    value.parse::<Resolution>().map_err(|e| e.to_string())
}

impl Args {
    /// Get socket timeout as Duration
    pub fn socket_timeout_duration(&self) -> Duration {
        self.socket_timeout.into()
    }

    /// Resolution policy selected on the command line
    pub fn resolution_policy(&self) -> ResolutionPolicy {
        self.policy.into()
    }

    /// Transfer settings for the download tool
    pub fn tuning(&self) -> DownloadTuning {
        DownloadTuning::default()
            .with_retries(self.retries)
            .with_concurrent_fragments(self.concurrent_fragments)
            .with_socket_timeout(self.socket_timeout_duration())
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            url: String::new(),
            output: PathBuf::from("."),
            resolution: Resolution::default(),
            yes: false,
            policy: PolicyArg::ClosestFit,
            playlist: false,
            simulate: false,
            json: false,
            ytdlp: None,
            socket_timeout: humantime::Duration::from(Duration::from_secs(30)),
            retries: 10,
            concurrent_fragments: 16,
            no_progress: false,
            verbose: false,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positionals_and_defaults() {
        let args = Args::try_parse_from(["vget", "https://example.com/v", "/tmp/out"]).unwrap();
        assert_eq!(args.url, "https://example.com/v");
        assert_eq!(args.output, PathBuf::from("/tmp/out"));
        assert_eq!(args.resolution.height(), 1080);
        assert_eq!(args.resolution_policy(), ResolutionPolicy::ClosestFit);
        assert_eq!(args.socket_timeout_duration(), Duration::from_secs(30));
        assert!(!args.yes);
    }

    #[test]
    fn test_explicit_resolution() {
        let args = Args::try_parse_from(["vget", "u", "out", "720p"]).unwrap();
        assert_eq!(args.resolution.height(), 720);

        let args = Args::try_parse_from(["vget", "u", "out", "480"]).unwrap();
        assert_eq!(args.resolution.height(), 480);

        assert!(Args::try_parse_from(["vget", "u", "out", "hd"]).is_err());
        assert!(Args::try_parse_from(["vget", "u", "out", "0p"]).is_err());
    }

    #[test]
    fn test_missing_positionals() {
        assert!(Args::try_parse_from(["vget"]).is_err());
        assert!(Args::try_parse_from(["vget", "https://example.com/v"]).is_err());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "vget",
            "u",
            "out",
            "--yes",
            "--policy",
            "strict",
            "--socket-timeout",
            "1m",
            "--retries",
            "3",
            "--concurrent-fragments",
            "0",
            "--ytdlp",
            "/opt/yt-dlp",
        ])
        .unwrap();

        assert!(args.yes);
        assert_eq!(args.resolution_policy(), ResolutionPolicy::Strict);
        assert_eq!(args.ytdlp, Some(PathBuf::from("/opt/yt-dlp")));

        let tuning = args.tuning();
        assert_eq!(tuning.retries, 3);
        assert_eq!(tuning.fragment_retries, 3);
        assert_eq!(tuning.concurrent_fragments, 1);
        assert_eq!(tuning.socket_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_args_verbosity_level() {
        let args = Args::default();
        assert_eq!(args.verbosity_level(), VerbosityLevel::Normal);

        let args = Args {
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);

        let args = Args {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);
    }
}
