//! CLI argument parsing using clap

use super::{OutputFormat, PoolBackend};
use clap::Parser;
use std::path::PathBuf;

/// agestat - mean and median age across many CSV files
#[derive(Parser, Debug)]
#[command(name = "agestat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input files: local paths or http(s) URLs
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Fixed number of worker threads (default: min(cores, number of files))
    #[arg(short = 't', long, env = "AGESTAT_THREADS")]
    pub threads: Option<usize>,

    /// Worker pool implementation
    #[arg(long, value_enum)]
    pub backend: Option<PoolBackend>,

    /// TOML configuration file (command-line flags take precedence)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Report each file as it completes
    #[arg(long)]
    pub progress: bool,

    /// Include CPU and memory usage in the report
    #[arg(long)]
    pub profile: bool,

    /// Per-file HTTP timeout (e.g., 30s, 5m, 1h); no timeout by default
    #[arg(long)]
    pub timeout: Option<String>,

    /// Field delimiter (e.g., ",", ";", "tab")
    #[arg(long)]
    pub delimiter: Option<String>,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
