// Benchmark configuration (demo inputs and pool sizing)

use crate::domain::TaskArgs;
use crate::error::{AppError, Result};

/// Upper bounds for the CPU-bound demo workload
pub const DEFAULT_CPU_ARGS: [i64; 4] = [100_000, 200_000, 300_000, 400_000];

/// Sleep durations (seconds) for the I/O-bound demo workload
pub const DEFAULT_IO_ARGS: [f64; 4] = [0.5, 0.5, 0.5, 0.5];

/// Upper limit on pool size; the demo uses min(this, cpu count)
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Total counter increments in the contention demo (10 million)
pub const DEFAULT_CONTENTION_ITERATIONS: u64 = 10_000_000;

/// Threads sharing the counter in the contention demo
pub const DEFAULT_CONTENTION_THREADS: usize = 4;

/// Demo configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub cpu_args: Vec<TaskArgs>,
    pub io_args: Vec<TaskArgs>,
    pub max_workers: usize,
    pub contention_iterations: u64,
    pub contention_threads: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            cpu_args: TaskArgs::ints(DEFAULT_CPU_ARGS),
            io_args: TaskArgs::floats(DEFAULT_IO_ARGS),
            max_workers: DEFAULT_MAX_WORKERS,
            contention_iterations: DEFAULT_CONTENTION_ITERATIONS,
            contention_threads: DEFAULT_CONTENTION_THREADS,
        }
    }
}

impl BenchConfig {
    /// Reject values the demo cannot run with
    ///
    /// # Errors
    /// - AppError::Config if `max_workers` or `contention_threads` is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(AppError::Config("max_workers must be at least 1".to_string()));
        }
        if self.contention_threads == 0 {
            return Err(AppError::Config(
                "contention_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Pool size for the demo: min(max_workers, cpu_count), at least 1
    pub fn workers_for(&self, cpu_count: usize) -> usize {
        self.max_workers.min(cpu_count).max(1)
    }
}
