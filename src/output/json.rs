//! JSON output formatting
//!
//! Serializes a [`RunResult`] as one JSON document. Ages that are not finite
//! (no age values at all) serialize as `null`.

use super::RunResult;
use crate::stats::MedianRecord;
use crate::util::resource::ResourceStats;
use crate::util::time::{duration_micros, format_duration};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: duration_micros(d),
            human: format_duration(d),
        }
    }
}

/// File counts of a run
#[derive(Debug, Clone, Serialize)]
pub struct JsonFiles {
    pub total: usize,
    pub valid: usize,
    pub failed: usize,
}

/// Top-level JSON report
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub elapsed: JsonDuration,
    pub num_threads: usize,
    pub files: JsonFiles,
    pub rows: usize,
    pub average_age: Option<f64>,
    pub median_age: Option<f64>,
    pub median_record: Option<MedianRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceStats>,
}

impl JsonReport {
    pub fn from_result(result: &RunResult) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            elapsed: JsonDuration::from_duration(result.elapsed),
            num_threads: result.num_threads,
            files: JsonFiles {
                total: result.files_total,
                valid: result.files_total - result.files_failed,
                failed: result.files_failed,
            },
            rows: result.rows,
            average_age: finite(result.average_age),
            median_age: finite(result.median_age),
            median_record: result.median_record.clone(),
            resources: result.resources,
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Render a result as pretty-printed JSON
pub fn to_json_string(result: &RunResult) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::from_result(result))
        .context("Failed to serialize JSON report")
}
