//! Run result and its renderings
//!
//! [`RunResult`] is created with zero defaults when a run starts and filled in
//! as the figures become available. `text` renders it as the multi-line
//! summary, `json` as a single JSON document.

pub mod json;
pub mod text;

use crate::config::OutputFormat;
use crate::stats::MedianRecord;
use crate::util::resource::ResourceStats;
use crate::Result;
use std::time::Duration;

/// Outcome of one completed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    pub average_age: f64,
    pub median_age: f64,
    /// Wall-clock time from pool sizing to the end of aggregation
    pub elapsed: Duration,
    /// Representative median record, if any row matched the median exactly
    pub median_record: Option<MedianRecord>,
    pub num_threads: usize,
    pub files_total: usize,
    pub files_failed: usize,
    /// Rows in the merged dataset
    pub rows: usize,
    /// Only present when profiling was enabled and supported
    pub resources: Option<ResourceStats>,
}

impl RunResult {
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads,
            ..Self::default()
        }
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// First name of the median record, empty when none was found
    pub fn median_record_fname(&self) -> &str {
        self.median_record.as_ref().map_or("", |r| r.fname.as_str())
    }

    /// Last name of the median record, empty when none was found
    pub fn median_record_lname(&self) -> &str {
        self.median_record.as_ref().map_or("", |r| r.lname.as_str())
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => json::to_json_string(self),
        }
    }
}
