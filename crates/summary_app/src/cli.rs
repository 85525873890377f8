use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;

/// Command-line arguments for meeting-summary
#[derive(Parser, Debug)]
#[command(name = "meeting-summary")]
#[command(about = "Upload a meeting recording and print its title, summary, to-do list and transcript")]
#[command(version)]
pub struct Args {
    /// Audio or video file to upload
    pub file: Option<PathBuf>,

    /// Base URL of the summary API
    #[arg(long, env = "MEETING_SUMMARY_BASE_URL")]
    pub base_url: Option<String>,

    /// Milliseconds between job status checks
    #[arg(long, env = "MEETING_SUMMARY_POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    /// Directory to save the finished meeting as markdown
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// RON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
