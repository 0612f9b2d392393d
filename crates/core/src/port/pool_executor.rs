// Pool Executor Port
// Abstraction over worker pools (in-process threads or OS processes)

use crate::domain::{RunOutcome, TaskArgs};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use thiserror::Error;

/// Kind of worker a pool is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Threads,
    Processes,
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolKind::Threads => write!(f, "Threading"),
            PoolKind::Processes => write!(f, "Multiprocessing"),
        }
    }
}

/// Worker process errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Worker exited: {0}")]
    WorkerExited(String),
}

/// Pool executor trait
///
/// Implementations:
/// - ThreadPoolExecutor: bounded pool of blocking threads in this process
/// - ProcessPoolExecutor: pool of worker processes (infra-system)
///
/// Every implementation returns results in submission order, blocks until
/// every submitted task has finished, and tears its pool down before returning.
#[async_trait]
pub trait PoolExecutor: Send + Sync {
    /// Labels this pool's timings in progress output
    fn kind(&self) -> PoolKind;

    /// Apply `task` to every argument set using `workers` concurrent workers
    ///
    /// # Errors
    /// - AppError::NotCallable if `task` is not registered (checked first)
    /// - AppError::InvalidWorkerCount if `workers` <= 0 (checked before the pool starts)
    /// - AppError::Task if any task call fails
    async fn run(&self, task: &str, args: &[TaskArgs], workers: i64) -> Result<RunOutcome>;
}

/// Convert a requested worker count into a pool size
///
/// # Errors
/// - AppError::InvalidWorkerCount if `workers` is zero or negative
pub fn validate_workers(workers: i64) -> Result<usize> {
    if workers <= 0 {
        return Err(AppError::InvalidWorkerCount(workers));
    }
    usize::try_from(workers).map_err(|_| AppError::InvalidWorkerCount(workers))
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::TaskError;
    use std::sync::{Arc, Mutex};

    /// Mock pool behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Echo the first argument of each set back, reporting a fixed elapsed time
        Echo(f64),
        /// Fail every run with a task error
        Fail(String),
    }

    /// Mock PoolExecutor for testing
    pub struct MockPoolExecutor {
        kind: PoolKind,
        behavior: MockBehavior,
        calls: Arc<Mutex<Vec<(String, usize, i64)>>>,
    }

    impl MockPoolExecutor {
        pub fn new(kind: PoolKind, behavior: MockBehavior) -> Self {
            Self {
                kind,
                behavior,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_echo(kind: PoolKind, elapsed_secs: f64) -> Self {
            Self::new(kind, MockBehavior::Echo(elapsed_secs))
        }

        pub fn new_fail(kind: PoolKind, message: impl Into<String>) -> Self {
            Self::new(kind, MockBehavior::Fail(message.into()))
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Recorded (task, number of argument sets, workers) per call
        pub fn calls(&self) -> Vec<(String, usize, i64)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PoolExecutor for MockPoolExecutor {
        fn kind(&self) -> PoolKind {
            self.kind
        }

        async fn run(&self, task: &str, args: &[TaskArgs], workers: i64) -> Result<RunOutcome> {
            self.calls
                .lock()
                .unwrap()
                .push((task.to_string(), args.len(), workers));
            validate_workers(workers)?;

            match &self.behavior {
                MockBehavior::Echo(elapsed_secs) => Ok(RunOutcome::new(
                    args.iter()
                        .filter_map(|a| a.as_slice().first().cloned())
                        .collect(),
                    *elapsed_secs,
                )),
                MockBehavior::Fail(msg) => Err(TaskError::Failed(msg.clone()).into()),
            }
        }
    }
}
