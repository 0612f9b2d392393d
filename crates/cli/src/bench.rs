//! Bench facade - the function-call API over the three runners and the comparator

use std::sync::Arc;

use parabench_core::application::{Comparator, SequentialRunner, ThreadPoolExecutor};
use parabench_core::domain::{PerformanceReport, RunOutcome, TaskArgs, TaskRegistry};
use parabench_core::port::{PoolExecutor, Reporter, SystemTimeProvider, TimeProvider};
use parabench_core::Result;
use parabench_infra_system::{ProcessPoolExecutor, WorkerCommand};

/// Wires the runners together over one task registry
pub struct Bench {
    sequential: Arc<SequentialRunner>,
    threads: Arc<ThreadPoolExecutor>,
    processes: Arc<ProcessPoolExecutor>,
    comparator: Comparator,
}

impl Bench {
    /// Build a bench over the built-in tasks
    ///
    /// `worker` must launch a process that serves the built-in registry
    /// (normally `parabench worker`).
    pub fn new(worker: WorkerCommand, reporter: Arc<dyn Reporter>) -> Self {
        Self::with_registry(TaskRegistry::builtin(), worker, reporter)
    }

    pub fn with_registry(
        registry: TaskRegistry,
        worker: WorkerCommand,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let registry = Arc::new(registry);
        let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);

        let sequential = Arc::new(SequentialRunner::new(
            Arc::clone(&registry),
            Arc::clone(&time_provider),
        ));
        let threads = Arc::new(ThreadPoolExecutor::new(
            Arc::clone(&registry),
            Arc::clone(&time_provider),
        ));
        let processes = Arc::new(ProcessPoolExecutor::new(
            Arc::clone(&registry),
            worker,
            Arc::clone(&time_provider),
        ));
        let comparator = Comparator::new(
            Arc::clone(&sequential),
            threads.clone() as Arc<dyn PoolExecutor>,
            processes.clone() as Arc<dyn PoolExecutor>,
            reporter,
        );

        Self {
            sequential,
            threads,
            processes,
            comparator,
        }
    }

    /// Run on the calling thread; blocks until every task is done
    pub fn run_sequential(&self, task: &str, args: &[TaskArgs]) -> Result<RunOutcome> {
        self.sequential.run(task, args)
    }

    pub async fn run_threading(
        &self,
        task: &str,
        args: &[TaskArgs],
        num_threads: i64,
    ) -> Result<RunOutcome> {
        self.threads.run(task, args, num_threads).await
    }

    pub async fn run_multiprocessing(
        &self,
        task: &str,
        args: &[TaskArgs],
        num_processes: i64,
    ) -> Result<RunOutcome> {
        self.processes.run(task, args, num_processes).await
    }

    pub async fn compare_performance(
        &self,
        task_type: &str,
        task: &str,
        args: &[TaskArgs],
        num_workers: i64,
    ) -> Result<PerformanceReport> {
        self.comparator.compare(task_type, task, args, num_workers).await
    }
}
