//! agestat CLI entry point

use agestat::config::{cli::Cli, toml::load_config, validator::validate_config};
use agestat::reporter::{init_tracing, Reporter, TracingReporter};
use agestat::RunOutcome;
use anyhow::{Context, Result};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse_args();
    let reporter = TracingReporter;

    ExitCode::from(exit_status(run_cli(&cli, &reporter), &reporter))
}

/// Build and validate the configuration, then run over the given paths
fn run_cli(cli: &Cli, reporter: &dyn Reporter) -> Result<RunOutcome> {
    let config = load_config(cli).context("Failed to load configuration")?;
    validate_config(&config).context("Configuration validation failed")?;

    reporter.debug(&format!("Configuration: {config}"));

    agestat::run(&cli.paths, &config, reporter)
}

/// Process exit status for a finished run; errors are reported here
fn exit_status(outcome: Result<RunOutcome>, reporter: &dyn Reporter) -> u8 {
    match outcome {
        Ok(RunOutcome::Completed(_)) | Ok(RunOutcome::NoInput) => 0,
        Ok(RunOutcome::NoValidRecords) => 1,
        Err(e) => {
            reporter.error(&format!("Unexpected error: {e:#}"));
            1
        }
    }
}
