//! Run coordinator
//!
//! Drives one run: sizes the worker pool, parses every input through the
//! [`FileLoader`], drops the failures, merges the survivors into a
//! [`Dataset`] and reports the age statistics.

use crate::config::Config;
use crate::dataset::Dataset;
use crate::loader::FileLoader;
use crate::output::RunResult;
use crate::pool::{pool_size, Pool, WorkerPool};
use crate::reporter::Reporter;
use crate::stats;
use crate::util::resource::ResourceSampler;
use crate::Result;
use anyhow::Context;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No input paths were given
    NoInput,
    /// Every input failed to parse
    NoValidRecords,
    /// Statistics were computed and reported
    Completed(RunResult),
}

/// Parse `paths` and report the age statistics across all valid files
///
/// Per-file failures are reported and skipped. Pool construction and
/// aggregation errors are returned; nothing is reported for them here.
pub fn run(paths: &[String], config: &Config, reporter: &dyn Reporter) -> Result<RunOutcome> {
    if paths.is_empty() {
        reporter.info("No files to parse.");
        return Ok(RunOutcome::NoInput);
    }

    let num_threads = pool_size(config.workers.threads, paths.len());
    let start = Instant::now();

    let sampler = config
        .output
        .profile
        .then(|| ResourceSampler::start(Duration::from_millis(config.output.profile_interval_ms)));

    let pool = Pool::build(config.workers.backend, num_threads).with_context(|| {
        format!(
            "Failed to build {} pool with {} workers",
            config.workers.backend, num_threads
        )
    })?;

    let loader = FileLoader::from_config(&config.loader);
    let total = paths.len();
    let completed = AtomicUsize::new(0);

    let parsed = pool.map(paths, |path| {
        let set = loader.parse(path, reporter);
        if config.output.progress {
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            reporter.info(&format!("Progress: {done}/{total} files parsed"));
        }
        set
    });

    reporter.info(&format!(
        "Processed {} file(s) using {} threads in {:.3} seconds.",
        total,
        num_threads,
        start.elapsed().as_secs_f64()
    ));

    let files_failed = parsed.iter().filter(|set| set.is_none()).count();
    let dataset: Dataset = parsed.into_iter().flatten().collect();
    if dataset.num_parts() == 0 {
        reporter.warn("No valid records were read.");
        return Ok(RunOutcome::NoValidRecords);
    }

    let summary = stats::summarize(&dataset).context("Failed to compute age statistics")?;
    let elapsed = start.elapsed();

    let mut result = RunResult::new(num_threads);
    result.average_age = summary.average;
    result.median_age = summary.median;
    result.median_record = summary.median_record;
    result.elapsed = elapsed;
    result.files_total = total;
    result.files_failed = files_failed;
    result.rows = dataset.num_rows();
    result.resources = sampler.and_then(ResourceSampler::finish);

    reporter.info(&result.render(config.output.format)?);

    Ok(RunOutcome::Completed(result))
}
