//! Worker pools
//!
//! The orchestrator only needs one capability from a pool: run a task for
//! every item, wait until all of them are done, and hand back the results in
//! submission order. [`WorkerPool`] captures that, and [`Pool`] selects one of
//! the two backends at runtime.
//!
//! # Backends
//!
//! - **rayon**: a dedicated `rayon::ThreadPool` (default)
//! - **threads**: scoped OS threads fed through crossbeam channels
//!
//! # Example
//!
//! ```
//! use agestat::pool::{Pool, WorkerPool};
//! use agestat::config::PoolBackend;
//!
//! let pool = Pool::build(PoolBackend::Threads, 2).unwrap();
//! let squares = pool.map(&[1, 2, 3], |n| n * n);
//! assert_eq!(squares, vec![1, 4, 9]);
//! ```

pub mod rayon;
pub mod threads;

use crate::config::PoolBackend;
use anyhow::Result;

pub use self::rayon::RayonPool;
pub use self::threads::ThreadPool;

/// Submit-all / wait-all execution capability
pub trait WorkerPool {
    /// Number of concurrent workers
    fn num_workers(&self) -> usize;

    /// Run `task` on every item and block until all have completed
    ///
    /// Tasks may finish in any order; the returned vector is always in the
    /// order of `items`.
    fn map<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync;
}

/// Number of workers for a run over `num_items` inputs
///
/// A requested count is used as is. Otherwise the pool gets one worker per
/// logical CPU, capped by the number of inputs. Never below one.
pub fn pool_size(requested: Option<usize>, num_items: usize) -> usize {
    let size = match requested {
        Some(threads) => threads,
        None => num_cpus::get().min(num_items),
    };
    size.max(1)
}

/// Runtime-selected pool backend
pub enum Pool {
    Rayon(RayonPool),
    Threads(ThreadPool),
}

impl Pool {
    pub fn build(backend: PoolBackend, num_workers: usize) -> Result<Self> {
        Ok(match backend {
            PoolBackend::Rayon => Pool::Rayon(RayonPool::new(num_workers)?),
            PoolBackend::Threads => Pool::Threads(ThreadPool::new(num_workers)),
        })
    }
}

impl WorkerPool for Pool {
    fn num_workers(&self) -> usize {
        match self {
            Pool::Rayon(pool) => pool.num_workers(),
            Pool::Threads(pool) => pool.num_workers(),
        }
    }

    fn map<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        match self {
            Pool::Rayon(pool) => pool.map(items, task),
            Pool::Threads(pool) => pool.map(items, task),
        }
    }
}
