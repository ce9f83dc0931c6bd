//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Fixed number of workers; `None` sizes the pool to min(cores, files)
    #[serde(default)]
    pub threads: Option<usize>,
    /// Pool implementation
    #[serde(default)]
    pub backend: PoolBackend,
}

/// Worker pool backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PoolBackend {
    /// Dedicated rayon thread pool
    #[default]
    Rayon,
    /// Scoped OS threads fed through channels
    Threads,
}

impl fmt::Display for PoolBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolBackend::Rayon => write!(f, "rayon"),
            PoolBackend::Threads => write!(f, "threads"),
        }
    }
}

/// File loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Field delimiter (single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Per-file HTTP timeout in seconds; `None` waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_delimiter() -> char {
    ','
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            timeout_secs: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Rendering of the final report
    #[serde(default)]
    pub format: OutputFormat,
    /// Report each completed file
    #[serde(default)]
    pub progress: bool,
    /// Sample CPU and memory usage during the run
    #[serde(default)]
    pub profile: bool,
    /// Sampling interval for profiling (milliseconds)
    #[serde(default = "default_profile_interval_ms")]
    pub profile_interval_ms: u64,
}

fn default_profile_interval_ms() -> u64 {
    250
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            progress: false,
            profile: false,
            profile_interval_ms: default_profile_interval_ms(),
        }
    }
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-line human-readable summary
    #[default]
    Text,
    /// Single JSON document
    Json,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let threads = match self.workers.threads {
            Some(n) => n.to_string(),
            None => "auto".to_string(),
        };
        let timeout = match self.loader.timeout_secs {
            Some(secs) => format!("{secs}s"),
            None => "none".to_string(),
        };
        write!(
            f,
            "threads={threads} backend={} delimiter={:?} timeout={timeout} format={:?} progress={} profile={}",
            self.workers.backend,
            self.loader.delimiter,
            self.output.format,
            self.output.progress,
            self.output.profile,
        )
    }
}
