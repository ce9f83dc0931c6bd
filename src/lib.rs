//! agestat - mean and median age across many CSV files
//!
//! agestat parses a list of CSV files (local paths or http(s) URLs) in
//! parallel, skips the ones that cannot be read or lack an `fname` column,
//! merges the rest and reports the mean and median of the `age` column
//! together with a record whose age equals the median.
//!
//! # Architecture
//!
//! - **Loader**: per-file parsing, failures reported and turned into `None`
//! - **Pool**: submit-all / wait-all workers (rayon or scoped threads)
//! - **Dataset**: merged view over the surviving files
//! - **Stats**: mean, median and the representative median record
//! - **Coordinator**: the run itself, from pool sizing to the final report

pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod loader;
pub mod output;
pub mod pool;
pub mod reporter;
pub mod stats;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::{run, RunOutcome};

/// Result type used throughout agestat
pub type Result<T> = anyhow::Result<T>;
