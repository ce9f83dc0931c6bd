//! Resource utilization tracking
//!
//! CPU and memory usage of the agestat process, read from /proc/self/stat and
//! /proc/self/status. On systems without procfs every snapshot is `None` and
//! profiling silently reports nothing.

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use serde::Serialize;
use std::fs;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Resource utilization snapshot
#[derive(Debug, Clone, Copy)]
pub struct ResourceSnapshot {
    /// CPU time in user mode (microseconds)
    pub cpu_user_us: u64,
    /// CPU time in kernel mode (microseconds)
    pub cpu_system_us: u64,
    /// Wall-clock time when snapshot was taken
    pub timestamp: Instant,
    /// Resident Set Size (RSS) in bytes
    pub memory_rss_bytes: u64,
}

/// Resource utilization over a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceStats {
    /// CPU utilization percentage (0.0 - 100.0 * num_cores)
    pub cpu_percent: f64,
    /// Average memory usage in bytes
    pub memory_bytes: u64,
    /// Peak memory usage in bytes
    pub peak_memory_bytes: u64,
    /// Number of samples the figures are based on
    pub samples: usize,
}

impl ResourceSnapshot {
    /// Take a snapshot of current resource utilization
    ///
    /// Returns None if unable to read proc files (e.g., on non-Linux systems).
    pub fn take() -> Option<Self> {
        let (cpu_user_us, cpu_system_us) = Self::read_cpu_time()?;
        let memory_rss_bytes = Self::read_rss()?;

        Some(Self {
            cpu_user_us,
            cpu_system_us,
            timestamp: Instant::now(),
            memory_rss_bytes,
        })
    }

    /// Read CPU time from /proc/self/stat
    ///
    /// Returns (user_time_us, system_time_us) or None on error.
    fn read_cpu_time() -> Option<(u64, u64)> {
        let stat = fs::read_to_string("/proc/self/stat").ok()?;

        // The command name may contain spaces; fields are counted after ')'
        // state ppid pgrp session tty_nr tpgid flags minflt cminflt majflt cmajflt utime stime ...
        let after_comm = &stat[stat.rfind(')')? + 1..];
        let fields: Vec<&str> = after_comm.split_whitespace().collect();
        if fields.len() < 13 {
            return None;
        }

        let utime_ticks: u64 = fields[11].parse().ok()?;
        let stime_ticks: u64 = fields[12].parse().ok()?;

        let ticks_per_sec = clock_ticks_per_sec();
        let utime_us = utime_ticks * 1_000_000 / ticks_per_sec;
        let stime_us = stime_ticks * 1_000_000 / ticks_per_sec;

        Some((utime_us, stime_us))
    }

    /// Read resident memory from /proc/self/status
    fn read_rss() -> Option<u64> {
        let status = fs::read_to_string("/proc/self/status").ok()?;

        // VmRSS:     12345 kB
        let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
        let rss_kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;

        Some(rss_kb * 1024)
    }

    /// Calculate CPU utilization between two snapshots
    ///
    /// Returns CPU percentage (0.0 - 100.0 * num_cores).
    /// For example, 150.0 means 1.5 cores worth of CPU time.
    pub fn cpu_percent_since(&self, earlier: &ResourceSnapshot) -> f64 {
        let wall_time_us = self.timestamp.duration_since(earlier.timestamp).as_micros() as u64;
        if wall_time_us == 0 {
            return 0.0;
        }

        let cpu_time_us = (self.cpu_user_us + self.cpu_system_us)
            .saturating_sub(earlier.cpu_user_us + earlier.cpu_system_us);

        (cpu_time_us as f64 / wall_time_us as f64) * 100.0
    }
}

/// Clock ticks per second used by /proc/self/stat
fn clock_ticks_per_sec() -> u64 {
    // SAFETY: sysconf has no preconditions and only reads a constant
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 {
        ticks as u64
    } else {
        100
    }
}

/// Resource tracker that accumulates snapshots over time
#[derive(Debug, Clone, Default)]
pub struct ResourceTracker {
    start_snapshot: Option<ResourceSnapshot>,
    samples: Vec<ResourceSnapshot>,
    peak_memory_bytes: u64,
}

impl ResourceTracker {
    /// Create a new resource tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking (take initial snapshot)
    pub fn start(&mut self) {
        if let Some(snapshot) = ResourceSnapshot::take() {
            self.peak_memory_bytes = snapshot.memory_rss_bytes;
            self.start_snapshot = Some(snapshot);
        }
    }

    /// Sample current resource utilization
    pub fn sample(&mut self) {
        if let Some(snapshot) = ResourceSnapshot::take() {
            self.peak_memory_bytes = self.peak_memory_bytes.max(snapshot.memory_rss_bytes);
            self.samples.push(snapshot);
        }
    }

    /// Get resource statistics
    ///
    /// Returns None if tracking never started or is not supported.
    pub fn stats(&self) -> Option<ResourceStats> {
        let start = self.start_snapshot.as_ref()?;
        let last = self.samples.last()?;

        let total_memory: u64 = self.samples.iter().map(|s| s.memory_rss_bytes).sum();

        Some(ResourceStats {
            cpu_percent: last.cpu_percent_since(start),
            memory_bytes: total_memory / self.samples.len() as u64,
            peak_memory_bytes: self.peak_memory_bytes,
            samples: self.samples.len(),
        })
    }
}

/// Background thread sampling a [`ResourceTracker`] at a fixed interval
pub struct ResourceSampler {
    stop_tx: Sender<()>,
    handle: JoinHandle<ResourceTracker>,
}

impl ResourceSampler {
    /// Take the initial snapshot and start sampling every `interval`
    pub fn start(interval: Duration) -> Self {
        let (stop_tx, stop_rx) = channel::bounded::<()>(1);

        let handle = std::thread::spawn(move || {
            let mut tracker = ResourceTracker::new();
            tracker.start();
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tracker.sample(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            // Always end with a sample so short runs still report figures
            tracker.sample();
            tracker
        });

        Self { stop_tx, handle }
    }

    /// Stop sampling and summarize
    pub fn finish(self) -> Option<ResourceStats> {
        let _ = self.stop_tx.send(());
        self.handle.join().ok()?.stats()
    }
}
