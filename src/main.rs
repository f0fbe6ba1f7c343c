//! tiff-meta - Print pixel dimensions and DPI for a tree of TIFF files.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiff_meta::{
    batch::{extract_all, BatchSummary},
    config::{Config, OutputFormat},
    report::{display_name, error_line, json_line, metadata_line},
    scan::discover,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    run(config).await
}

async fn run(config: Config) -> ExitCode {
    let options = config.scan_options();
    let paths = match discover(&config.root, &options) {
        Ok(paths) => paths,
        Err(e) => {
            error!("Error processing directories: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Found {} .{} file(s) under {}",
        paths.len(),
        options.extension,
        config.root.display()
    );

    let reports = extract_all(paths, config.concurrency).await;

    for report in &reports {
        match config.format {
            OutputFormat::Text => {
                let name = display_name(&report.path);
                match &report.outcome {
                    Ok(metadata) => println!("{}", metadata_line(&name, metadata)),
                    Err(err) => error!("{}", error_line(&name, err)),
                }
            }
            OutputFormat::Json => match json_line(report) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to encode result for {}: {}", report.path.display(), e),
            },
        }
    }

    let summary = BatchSummary::from_reports(&reports);
    info!(
        "Done: {} succeeded, {} failed, {} total",
        summary.succeeded,
        summary.failed,
        summary.total()
    );

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so stdout carries only results.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tiff_meta=debug"
    } else {
        "tiff_meta=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
