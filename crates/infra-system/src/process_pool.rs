// Process pool executor
// reason: tokio::process for async child management, JSON lines for message passing
use async_trait::async_trait;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use parabench_core::application::timing::Stopwatch;
use parabench_core::application::worker::{WorkerOutcome, WorkerRequest, WorkerResponse};
use parabench_core::domain::{RunOutcome, TaskArgs, TaskRegistry, Value};
use parabench_core::error::{AppError, Result};
use parabench_core::port::{validate_workers, ExecutionError, PoolExecutor, PoolKind, TimeProvider};

/// Subcommand that puts the parabench binary into worker mode
pub const WORKER_SUBCOMMAND: &str = "worker";

/// How to launch one worker process
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl WorkerCommand {
    /// `program worker`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![OsString::from(WORKER_SUBCOMMAND)],
        }
    }

    /// The running executable in worker mode
    pub fn current_exe() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    /// Replace the arguments passed to `program`
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

type RequestQueue = Mutex<VecDeque<WorkerRequest>>;

fn next_request(queue: &RequestQueue) -> Option<WorkerRequest> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}

fn io_error(e: std::io::Error) -> ExecutionError {
    ExecutionError::IoError(e.to_string())
}

/// Process pool executor
///
/// Each run spawns up to `workers` worker processes, feeds them requests from
/// a shared queue (an idle worker takes the next pending request), and shuts
/// them down by closing their stdin once the queue is drained.
pub struct ProcessPoolExecutor {
    registry: Arc<TaskRegistry>,
    command: WorkerCommand,
    time_provider: Arc<dyn TimeProvider>,
}

impl ProcessPoolExecutor {
    /// Create a new process pool executor
    ///
    /// # Arguments
    /// * `registry` - used to reject unknown tasks before any process starts;
    ///   the worker binary must register the same task names
    /// * `command` - how to launch a worker
    /// * `time_provider` - clock for elapsed time
    ///
    /// # Example
    /// ```ignore
    /// let executor = ProcessPoolExecutor::new(
    ///     Arc::new(TaskRegistry::builtin()),
    ///     WorkerCommand::current_exe()?,
    ///     Arc::new(SystemTimeProvider),
    /// );
    /// ```
    pub fn new(
        registry: Arc<TaskRegistry>,
        command: WorkerCommand,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            registry,
            command,
            time_provider,
        }
    }

    /// Spawn one worker and serve requests from `queue` until it is empty
    async fn drive_worker(
        &self,
        slot: usize,
        queue: Arc<RequestQueue>,
    ) -> std::result::Result<Vec<WorkerResponse>, ExecutionError> {
        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExecutionError::SpawnFailed(format!("{}: {}", self.command.program.display(), e))
            })?;

        let pid = child.id();
        debug!(slot, pid = ?pid, "Worker process spawned");

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExecutionError::SpawnFailed("worker stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExecutionError::SpawnFailed("worker stdout not captured".to_string()))?;
        let mut replies = BufReader::new(stdout).lines();

        let mut responses = Vec::new();
        while let Some(request) = next_request(&queue) {
            let mut line = serde_json::to_string(&request)
                .map_err(|e| ExecutionError::Protocol(e.to_string()))?;
            line.push('\n');
            stdin.write_all(line.as_bytes()).await.map_err(io_error)?;
            stdin.flush().await.map_err(io_error)?;

            let reply = replies.next_line().await.map_err(io_error)?.ok_or_else(|| {
                ExecutionError::WorkerExited(format!(
                    "worker {:?} closed its output before answering request {}",
                    pid, request.id
                ))
            })?;
            let response: WorkerResponse = serde_json::from_str(&reply)
                .map_err(|e| ExecutionError::Protocol(format!("{}: {}", e, reply)))?;

            if response.id != request.id {
                return Err(ExecutionError::Protocol(format!(
                    "expected response for request {}, got {}",
                    request.id, response.id
                )));
            }
            responses.push(response);
        }

        // EOF on stdin ends the worker's serve loop
        drop(stdin);
        let status = child.wait().await.map_err(io_error)?;
        if !status.success() {
            return Err(ExecutionError::WorkerExited(format!(
                "worker {:?} exited with {}",
                pid, status
            )));
        }

        debug!(slot, pid = ?pid, served = responses.len(), "Worker process finished");
        Ok(responses)
    }
}

#[async_trait]
impl PoolExecutor for ProcessPoolExecutor {
    fn kind(&self) -> PoolKind {
        PoolKind::Processes
    }

    async fn run(&self, task: &str, args: &[TaskArgs], workers: i64) -> Result<RunOutcome> {
        self.registry.resolve(task)?;
        let pool_size = validate_workers(workers)?;

        let stopwatch = Stopwatch::start(self.time_provider.as_ref());
        let spawned = pool_size.min(args.len());

        info!(
            task = %task,
            tasks = args.len(),
            workers = pool_size,
            processes = spawned,
            program = %self.command.program.display(),
            "Starting process pool run"
        );

        let queue: Arc<RequestQueue> = Arc::new(Mutex::new(
            args.iter()
                .cloned()
                .enumerate()
                .map(|(id, args)| WorkerRequest {
                    id,
                    task: task.to_string(),
                    args,
                })
                .collect(),
        ));

        // Every worker runs to completion before any failure is reported
        let per_worker = futures::future::join_all(
            (0..spawned).map(|slot| self.drive_worker(slot, Arc::clone(&queue))),
        )
        .await;

        let mut outcomes: Vec<Option<WorkerOutcome>> = vec![None; args.len()];
        let mut first_failure: Option<ExecutionError> = None;
        for result in per_worker {
            match result {
                Ok(responses) => {
                    for response in responses {
                        if let Some(slot) = outcomes.get_mut(response.id) {
                            *slot = Some(response.outcome);
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Worker process failed");
                    first_failure.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_failure {
            return Err(e.into());
        }

        // Results are handed back in submission order; the first failed task fails the run
        let mut results: Vec<Value> = Vec::with_capacity(outcomes.len());
        for (id, outcome) in outcomes.into_iter().enumerate() {
            let outcome = outcome.ok_or_else(|| {
                AppError::from(ExecutionError::Protocol(format!(
                    "no worker answered request {}",
                    id
                )))
            })?;
            results.push(outcome.into_result()?);
        }

        let elapsed_secs = stopwatch.elapsed_secs();
        info!(
            task = %task,
            processes = spawned,
            elapsed_secs = %elapsed_secs,
            "Process pool run completed"
        );

        Ok(RunOutcome::new(results, elapsed_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parabench_core::port::SystemTimeProvider;

    fn executor(command: WorkerCommand) -> ProcessPoolExecutor {
        ProcessPoolExecutor::new(
            Arc::new(TaskRegistry::builtin()),
            command,
            Arc::new(SystemTimeProvider),
        )
    }

    #[tokio::test]
    async fn test_empty_input_spawns_nothing() {
        // The program does not exist; an empty run must not try to start it
        let outcome = executor(WorkerCommand::new("/nonexistent/parabench"))
            .run("cpu_intensive_task", &[], 2)
            .await
            .unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.elapsed_secs > 0.0);
    }

    #[tokio::test]
    async fn test_validation_before_spawn() {
        let pool = executor(WorkerCommand::new("/nonexistent/parabench"));

        let err = pool.run("not a function", &TaskArgs::ints([1]), 2).await.unwrap_err();
        assert!(matches!(err, AppError::NotCallable(_)));

        let err = pool.run("identity", &TaskArgs::ints([1]), 0).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidWorkerCount(0)));

        let err = pool.run("identity", &TaskArgs::ints([1]), -2).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidWorkerCount(-2)));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_execution_error() {
        let err = executor(WorkerCommand::new("/nonexistent/parabench"))
            .run("identity", &TaskArgs::ints([1, 2]), 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Execution(ExecutionError::SpawnFailed(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_worker_exiting_early_is_reported() {
        // `true` reads nothing and exits, so the first request never gets an answer
        let err = executor(WorkerCommand::new("true").with_args(Vec::<String>::new()))
            .run("identity", &TaskArgs::ints([1]), 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Execution(ExecutionError::WorkerExited(_))
                | AppError::Execution(ExecutionError::IoError(_))
        ));
    }

    #[test]
    fn test_worker_command_defaults() {
        let command = WorkerCommand::new("/usr/bin/parabench");
        assert_eq!(command.program(), &PathBuf::from("/usr/bin/parabench"));
        assert_eq!(command.args, vec![OsString::from("worker")]);
    }
}
