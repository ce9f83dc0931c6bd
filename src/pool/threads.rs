//! Scoped thread pool fed through crossbeam channels
//!
//! Each `map` call spawns `num_workers` scoped threads. Workers pull item
//! indices from a shared job channel and push `(index, result)` pairs back;
//! the caller slots results by index, so completion order does not matter.

use super::WorkerPool;
use crossbeam::channel;

/// Fixed-size pool of scoped OS threads
#[derive(Debug, Clone, Copy)]
pub struct ThreadPool {
    num_workers: usize,
}

impl ThreadPool {
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
        }
    }
}

impl WorkerPool for ThreadPool {
    fn num_workers(&self) -> usize {
        self.num_workers
    }

    fn map<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        let (job_tx, job_rx) = channel::unbounded::<usize>();
        let (result_tx, result_rx) = channel::unbounded::<(usize, R)>();

        for index in 0..items.len() {
            // Receiver is alive until the end of this function
            let _ = job_tx.send(index);
        }
        drop(job_tx);

        let task = &task;
        let slots: Vec<Option<R>> = std::thread::scope(|scope| {
            for _ in 0..self.num_workers.min(items.len()) {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for index in job_rx.iter() {
                        if result_tx.send((index, task(&items[index]))).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(result_tx);

            let mut slots: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();
            for (index, result) in result_rx.iter() {
                slots[index] = Some(result);
            }
            slots
        });

        // A worker panic propagates out of the scope, so every slot is filled here
        slots.into_iter().flatten().collect()
    }
}
