//! rayon-backed worker pool

use super::WorkerPool;
use anyhow::{Context, Result};
use rayon::prelude::*;

/// Dedicated rayon thread pool, sized once at construction
pub struct RayonPool {
    pool: rayon::ThreadPool,
}

impl RayonPool {
    pub fn new(num_workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("agestat-worker-{i}"))
            .build()
            .context("Failed to build rayon thread pool")?;

        Ok(Self { pool })
    }
}

impl WorkerPool for RayonPool {
    fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn map<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        // Indexed parallel iterators collect in input order
        self.pool.install(|| items.par_iter().map(|item| task(item)).collect())
    }
}
