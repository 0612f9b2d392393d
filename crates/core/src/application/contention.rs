// Contention demonstration - one shared counter, many threads
//
// The multi-threaded phase splits each increment into a separate load and
// store on an atomic, so concurrent increments can overwrite each other
// (lost updates) without undefined behavior. A final phase serializes every
// increment behind one shared mutex to emulate a global execution lock.

use crate::application::timing::Stopwatch;
use crate::domain::{speedup, ContentionReport};
use crate::error::{AppError, Result};
use crate::port::{Reporter, TimeProvider};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Runs the counter contention experiment
pub struct ContentionDemo {
    iterations: u64,
    threads: usize,
    reporter: Arc<dyn Reporter>,
    time_provider: Arc<dyn TimeProvider>,
}

/// Unsynchronized read-modify-write; concurrent callers lose updates
fn increment_racy(counter: &AtomicU64, count: u64) {
    for _ in 0..count {
        let current = counter.load(Ordering::Relaxed);
        counter.store(current + 1, Ordering::Relaxed);
    }
}

/// Same increment, but only while holding the shared lock
fn increment_locked(counter: &AtomicU64, lock: &Mutex<()>, count: u64) {
    for _ in 0..count {
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = counter.load(Ordering::Relaxed);
        counter.store(current + 1, Ordering::Relaxed);
    }
}

impl ContentionDemo {
    pub fn new(
        iterations: u64,
        threads: usize,
        reporter: Arc<dyn Reporter>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            iterations,
            threads,
            reporter,
            time_provider,
        }
    }

    /// Run all phases and print the timings
    ///
    /// Blocking; spawns and joins `threads` OS threads per multi-threaded phase.
    ///
    /// # Errors
    /// - AppError::Config if `threads` is zero
    pub fn run(&self) -> Result<ContentionReport> {
        if self.threads == 0 {
            return Err(AppError::Config(
                "contention demo needs at least one thread".to_string(),
            ));
        }

        self.reporter.heading("Contention Demonstration:");

        let counter = AtomicU64::new(0);
        let stopwatch = Stopwatch::start(self.time_provider.as_ref());
        increment_racy(&counter, self.iterations);
        let single_thread_secs = stopwatch.elapsed_secs();
        self.reporter.line(&format!("- Single thread time: {:.2}s", single_thread_secs));

        let per_thread = self.iterations / self.threads as u64;
        let expected_count = per_thread * self.threads as u64;

        counter.store(0, Ordering::Relaxed);
        let stopwatch = Stopwatch::start(self.time_provider.as_ref());
        std::thread::scope(|scope| {
            for _ in 0..self.threads {
                scope.spawn(|| increment_racy(&counter, per_thread));
            }
        });
        let multi_thread_secs = stopwatch.elapsed_secs();
        let racy_final_count = counter.load(Ordering::Relaxed);
        let observed_speedup = speedup(single_thread_secs, multi_thread_secs);

        self.reporter.line(&format!(
            "- Multi-thread time ({} threads): {:.2}s",
            self.threads, multi_thread_secs
        ));
        self.reporter.line(&format!("- Speedup: {:.2}x", observed_speedup));
        self.reporter.line(&format!(
            "- Note: Ideal speedup would be {:.2}x",
            self.threads as f64
        ));
        self.reporter.line(&format!(
            "- Final counter: {} of {} increments ({} lost to unsynchronized read-modify-write)",
            racy_final_count,
            expected_count,
            expected_count.saturating_sub(racy_final_count)
        ));

        let lock = Mutex::new(());
        counter.store(0, Ordering::Relaxed);
        let stopwatch = Stopwatch::start(self.time_provider.as_ref());
        std::thread::scope(|scope| {
            for _ in 0..self.threads {
                scope.spawn(|| increment_locked(&counter, &lock, per_thread));
            }
        });
        let locked_secs = stopwatch.elapsed_secs();
        let locked_final_count = counter.load(Ordering::Relaxed);

        self.reporter.line(&format!(
            "- Emulated global lock ({} threads): {:.2}s ({:.2}x speedup), counter {}",
            self.threads,
            locked_secs,
            speedup(single_thread_secs, locked_secs),
            locked_final_count
        ));
        self.reporter.line("- This demonstrates lock contention in CPU-bound tasks.");

        info!(
            iterations = self.iterations,
            threads = self.threads,
            single_thread_secs = %single_thread_secs,
            multi_thread_secs = %multi_thread_secs,
            locked_secs = %locked_secs,
            racy_final_count,
            "Contention demo completed"
        );

        Ok(ContentionReport {
            iterations: self.iterations,
            threads: self.threads,
            single_thread_secs,
            multi_thread_secs,
            speedup: observed_speedup,
            expected_count,
            racy_final_count,
            locked_secs,
            locked_final_count,
        })
    }
}
