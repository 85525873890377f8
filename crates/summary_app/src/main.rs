//! meeting-summary: upload a recording, wait for the server-side job, print the results.

mod app;
mod cli;
mod config;
mod effects;
mod timer;
mod ui;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use engine_logging::{engine_info, DEFAULT_LOG_FILE};
use log::LevelFilter;
use summary_core::UiState;

use crate::cli::Args;
use crate::config::{ClientConfig, ClientSettings};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(args.log.into(), level, Path::new(DEFAULT_LOG_FILE));

    let file_config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    let settings = ClientSettings::resolve(&args, file_config)?;
    engine_info!("Starting meeting-summary with {:?}", settings);

    let outcome = app::run_app(settings, args.file.clone(), !args.no_color)?;
    engine_info!("Finished in state {:?}", outcome);

    Ok(match outcome {
        UiState::Complete => ExitCode::SUCCESS,
        UiState::Idle => {
            eprintln!("No file selected; pass the recording to upload as the first argument.");
            ExitCode::from(2)
        }
        UiState::Uploading | UiState::Polling | UiState::Failed => ExitCode::FAILURE,
    })
}
