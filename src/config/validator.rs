//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_workers(&config.workers)?;
    validate_loader(&config.loader)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate worker configuration
pub fn validate_workers(workers: &WorkerConfig) -> Result<()> {
    if workers.threads == Some(0) {
        anyhow::bail!("threads must be at least 1");
    }

    Ok(())
}

/// Validate loader configuration
pub fn validate_loader(loader: &LoaderConfig) -> Result<()> {
    // The CSV reader takes a single byte
    if !loader.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be an ASCII character, got {:?}", loader.delimiter);
    }
    if matches!(loader.delimiter, '"' | '\n' | '\r') {
        anyhow::bail!("delimiter {:?} is reserved by the CSV format", loader.delimiter);
    }

    if loader.timeout_secs == Some(0) {
        anyhow::bail!("timeout must be greater than zero (omit it to wait indefinitely)");
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.profile && output.profile_interval_ms == 0 {
        anyhow::bail!("profile_interval_ms must be greater than zero");
    }

    Ok(())
}
