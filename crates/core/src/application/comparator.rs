// Comparator - runs one workload through all three strategies

use crate::application::sequential::SequentialRunner;
use crate::application::thread_pool::join_failure;
use crate::domain::{speedup, PerformanceReport, RunOutcome, TaskArgs, TaskCategory};
use crate::error::Result;
use crate::port::{PoolExecutor, Reporter};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Compares sequential, thread-pool and process-pool execution of the same inputs
pub struct Comparator {
    sequential: Arc<SequentialRunner>,
    threads: Arc<dyn PoolExecutor>,
    processes: Arc<dyn PoolExecutor>,
    reporter: Arc<dyn Reporter>,
}

impl Comparator {
    pub fn new(
        sequential: Arc<SequentialRunner>,
        threads: Arc<dyn PoolExecutor>,
        processes: Arc<dyn PoolExecutor>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            sequential,
            threads,
            processes,
            reporter,
        }
    }

    /// Run the workload sequentially, on threads, then on processes
    ///
    /// # Arguments
    /// * `task_type` - "CPU-bound" or "I/O-bound"
    /// * `task` - registered task name
    /// * `args` - argument sets, identical for all three runs
    /// * `workers` - pool size for both pools
    ///
    /// # Errors
    /// - AppError::UnknownCategory before any runner is invoked
    /// - any runner error, unchanged
    ///
    /// # Example
    /// ```text
    /// let report = comparator
    ///     .compare("CPU-bound", "cpu_intensive_task", &TaskArgs::ints([10_000, 20_000]), 4)
    ///     .await?;
    /// println!("{:.2}x", report.multiprocessing_speedup);
    /// ```
    pub async fn compare(
        &self,
        task_type: &str,
        task: &str,
        args: &[TaskArgs],
        workers: i64,
    ) -> Result<PerformanceReport> {
        let category: TaskCategory = task_type.parse()?;

        self.reporter.heading(&format!("{} task ({} workers):", category, workers));

        let sequential = self.run_sequential(task, args).await?.elapsed_secs;
        self.reporter.line(&format!("- Sequential: {:.2}s", sequential));

        let threading = self.run_pool(self.threads.as_ref(), task, args, workers).await?;
        let threading_speedup = speedup(sequential, threading);
        self.report_pool(self.threads.as_ref(), threading, threading_speedup);

        let multiprocessing = self.run_pool(self.processes.as_ref(), task, args, workers).await?;
        let multiprocessing_speedup = speedup(sequential, multiprocessing);
        self.report_pool(self.processes.as_ref(), multiprocessing, multiprocessing_speedup);
        self.reporter.line(
            "- Note: threads here share no global execution lock, so threading can also speed up CPU-bound work",
        );

        info!(
            category = %category,
            task = %task,
            workers,
            sequential_secs = %sequential,
            threading_secs = %threading,
            multiprocessing_secs = %multiprocessing,
            "Comparison completed"
        );

        Ok(PerformanceReport {
            task_category: category,
            workers,
            sequential,
            threading,
            multiprocessing,
            threading_speedup,
            multiprocessing_speedup,
            measured_at: Utc::now(),
        })
    }

    async fn run_pool(
        &self,
        pool: &dyn PoolExecutor,
        task: &str,
        args: &[TaskArgs],
        workers: i64,
    ) -> Result<f64> {
        let elapsed_secs = pool.run(task, args, workers).await?.elapsed_secs;
        info!(pool = %pool.kind(), task = %task, elapsed_secs = %elapsed_secs, "Pool run timed");
        Ok(elapsed_secs)
    }

    fn report_pool(&self, pool: &dyn PoolExecutor, elapsed_secs: f64, speedup: f64) {
        self.reporter.line(&format!(
            "- {}: {:.2}s ({:.2}x speedup)",
            pool.kind(),
            elapsed_secs,
            speedup
        ));
    }

    /// The sequential baseline blocks, so it runs off the async worker threads
    async fn run_sequential(&self, task: &str, args: &[TaskArgs]) -> Result<RunOutcome> {
        let runner = Arc::clone(&self.sequential);
        let task = task.to_string();
        let args = args.to_vec();

        tokio::task::spawn_blocking(move || runner.run(&task, &args))
            .await
            .map_err(join_failure)?
    }
}
