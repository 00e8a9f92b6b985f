//! Main entry point for vget CLI

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vget::cli::output::{create_progress_callback, OutputFormatter};
use vget::cli::{Args, PolicyArg};
use vget::core::{ConfirmationGate, Downloader};
use vget::download::YtDlpExecutor;
use vget::platform::YtDlp;
use vget::VgetError;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    debug!("Starting vget with args: {:?}", args);

    let formatter = Arc::new(OutputFormatter::new(args.verbosity_level()));

    match run(&args, formatter.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_cancellation(&e) => {
            println!("Download cancelled by user.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            formatter.finish_progress("failed");
            formatter.error(&format!("Error occurred: {:#}", e));
            if is_selection_error(&e) && args.policy == PolicyArg::Strict {
                formatter.error("Pass a listed resolution or use --policy closest-fit");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, formatter: Arc<OutputFormatter>) -> anyhow::Result<()> {
    let ytdlp = YtDlp::locate(args.ytdlp.clone())
        .await
        .context("yt-dlp is required")?
        .with_socket_timeout(args.socket_timeout_duration());
    let executor = YtDlpExecutor::new(ytdlp.binary()).with_tuning(args.tuning());

    let mut downloader = Downloader::new(ytdlp, executor)
        .with_resolution(args.resolution)
        .with_policy(args.resolution_policy())
        .with_output_path(&args.output)
        .with_playlist(args.playlist);

    if !args.no_progress {
        downloader = downloader.with_progress(create_progress_callback(formatter.clone()));
    }

    let on_item = |done: usize, total: usize| {
        if !args.json {
            formatter.print_analysis_progress(done, total);
        }
    };

    // JSON goes to stdout untouched, so it implies --simulate
    if args.simulate || args.json {
        let inspection = downloader
            .inspect(&args.url, on_item)
            .await
            .with_context(|| format!("could not inspect {}", args.url))?;
        if args.json {
            formatter.print_json(&inspection)?;
        } else {
            formatter.print_inspection(&inspection);
        }
        info!("Simulation only, nothing downloaded");
        return Ok(());
    }

    let mut gate = ConfirmationGate::stdio().with_auto_confirm(args.yes);
    let report = downloader
        .run(&args.url, &mut gate, on_item, |inspection| {
            formatter.print_inspection(inspection);
        })
        .await?;
    formatter.finish_progress("done");

    info!("Download completed in {:?}", report.elapsed);
    formatter.print_download_complete(&report.destination, report.elapsed);

    Ok(())
}

fn is_cancellation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<VgetError>()
        .is_some_and(VgetError::is_cancellation)
}

fn is_selection_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<VgetError>()
        .is_some_and(VgetError::is_selection_error)
}

/// Initialize logging system
///
/// `RUST_LOG` wins; otherwise `debug` with `--verbose` and `warn` by default.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(verbose)
                .with_line_number(verbose)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
