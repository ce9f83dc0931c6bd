//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{parse_delimiter, parse_duration};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(threads) = cli.threads {
        config.workers.threads = Some(threads);
    }
    if let Some(backend) = cli.backend {
        config.workers.backend = backend;
    }

    if let Some(ref timeout) = cli.timeout {
        config.loader.timeout_secs = Some(parse_duration(timeout).context("Invalid timeout")?);
    }
    if let Some(ref delimiter) = cli.delimiter {
        config.loader.delimiter = parse_delimiter(delimiter)?;
    }

    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.progress {
        config.output.progress = true;
    }
    if cli.profile {
        config.output.profile = true;
    }

    Ok(config)
}

/// Build the effective configuration: optional TOML file, then CLI overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    merge_cli_with_config(cli, base)
}
