// Thread pool executor - bounded pool of blocking threads inside this process
//
// Rust threads share no global execution lock, so unlike an interpreter with
// a GIL this pool runs CPU-bound work in parallel.

use crate::application::timing::Stopwatch;
use crate::application::worker::panic_message;
use crate::domain::{RunOutcome, TaskArgs, TaskError, TaskRegistry, Value};
use crate::error::{AppError, Result};
use crate::port::{validate_workers, PoolExecutor, PoolKind, TimeProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Runs tasks on tokio's blocking threads, at most `workers` at a time
pub struct ThreadPoolExecutor {
    registry: Arc<TaskRegistry>,
    time_provider: Arc<dyn TimeProvider>,
}

impl ThreadPoolExecutor {
    pub fn new(registry: Arc<TaskRegistry>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            registry,
            time_provider,
        }
    }
}

#[async_trait]
impl PoolExecutor for ThreadPoolExecutor {
    fn kind(&self) -> PoolKind {
        PoolKind::Threads
    }

    async fn run(&self, task: &str, args: &[TaskArgs], workers: i64) -> Result<RunOutcome> {
        let callable = self.registry.resolve(task)?;
        // More threads than tasks would sit idle; the cap also keeps the permit count in range
        let pool_size = validate_workers(workers)?.min(args.len().max(1));

        info!(task = %task, tasks = args.len(), workers = pool_size, "Starting thread pool run");
        let stopwatch = Stopwatch::start(self.time_provider.as_ref());

        // Permits bound the number of tasks running at once; submission waits for a free slot
        let permits = Arc::new(Semaphore::new(pool_size));
        let mut handles: Vec<JoinHandle<std::result::Result<Value, TaskError>>> =
            Vec::with_capacity(args.len());

        for task_args in args.iter().cloned() {
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|e| AppError::Internal(format!("Thread pool closed: {}", e)))?;
            let callable = Arc::clone(&callable);

            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                callable.call(task_args.as_slice())
            }));
        }

        // Collect in submission order; wait for every task before reporting the first failure
        let mut results = Vec::with_capacity(handles.len());
        let mut first_error: Option<AppError> = None;
        for (index, handle) in handles.into_iter().enumerate() {
            let outcome = match handle.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(AppError::Task(e)),
                Err(join_err) => {
                    let e = join_failure(join_err);
                    error!(task = %task, index, error = %e, "Thread pool task did not complete");
                    Err(e)
                }
            };

            match outcome {
                Ok(value) => results.push(value),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let elapsed_secs = stopwatch.elapsed_secs();
        info!(
            task = %task,
            workers = pool_size,
            elapsed_secs = %elapsed_secs,
            "Thread pool run completed"
        );

        Ok(RunOutcome::new(results, elapsed_secs))
    }
}

/// Map a blocking-task join failure to the error the caller sees
pub(crate) fn join_failure(join_err: JoinError) -> AppError {
    if join_err.is_panic() {
        AppError::TaskPanicked(panic_message(join_err.into_panic().as_ref()))
    } else {
        AppError::Internal(format!("Blocking task cancelled: {}", join_err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CpuIntensiveTask, FnTask, IdentityTask, IoIntensiveTask};
    use crate::port::SystemTimeProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn executor_with(registry: TaskRegistry) -> ThreadPoolExecutor {
        ThreadPoolExecutor::new(Arc::new(registry), Arc::new(SystemTimeProvider))
    }

    fn executor() -> ThreadPoolExecutor {
        executor_with(TaskRegistry::builtin())
    }

    #[tokio::test]
    async fn test_results_in_submission_order() {
        let outcome = executor()
            .run(CpuIntensiveTask::NAME, &TaskArgs::ints([5, 10, 15]), 2)
            .await
            .unwrap();
        assert_eq!(
            outcome.results,
            vec![Value::Int(10), Value::Int(17), Value::Int(41)]
        );
        assert!(outcome.elapsed_secs > 0.0);
    }

    #[tokio::test]
    async fn test_results_invariant_to_worker_count() {
        let args = TaskArgs::ints([15, 5, 10]);
        let single = executor().run(CpuIntensiveTask::NAME, &args, 1).await.unwrap();
        let many = executor().run(CpuIntensiveTask::NAME, &args, 5).await.unwrap();
        assert_eq!(single.results, many.results);

        let more_workers_than_tasks = executor()
            .run(CpuIntensiveTask::NAME, &TaskArgs::ints([5]), 5)
            .await
            .unwrap();
        assert_eq!(more_workers_than_tasks.results, vec![Value::Int(10)]);
    }

    #[tokio::test]
    async fn test_huge_worker_count_is_capped() {
        let outcome = executor()
            .run(CpuIntensiveTask::NAME, &TaskArgs::ints([5, 10]), i64::MAX)
            .await
            .unwrap();
        assert_eq!(outcome.results, vec![Value::Int(10), Value::Int(17)]);

        let empty = executor().run(CpuIntensiveTask::NAME, &[], i64::MAX).await.unwrap();
        assert!(empty.results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let outcome = executor().run(CpuIntensiveTask::NAME, &[], 2).await.unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.elapsed_secs > 0.0);
    }

    #[tokio::test]
    async fn test_validation_order() {
        // Invocability is checked before the worker count
        let err = executor().run("not a function", &[], 0).await.unwrap_err();
        assert!(matches!(err, AppError::NotCallable(_)));

        let err = executor()
            .run(IdentityTask::NAME, &TaskArgs::ints([1, 2, 3]), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidWorkerCount(0)));

        let err = executor()
            .run(IdentityTask::NAME, &TaskArgs::ints([1, 2, 3]), -1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidWorkerCount(-1)));
    }

    #[tokio::test]
    async fn test_io_tasks_overlap() {
        let args = TaskArgs::floats([0.2, 0.2, 0.2, 0.2]);
        let outcome = executor().run(IoIntensiveTask::NAME, &args, 4).await.unwrap();
        assert_eq!(outcome.results.len(), 4);
        // Four 0.2s sleeps on four threads finish well under the 0.8s sequential total
        assert!(outcome.elapsed_secs < 0.7, "elapsed {}", outcome.elapsed_secs);
    }

    #[tokio::test]
    async fn test_concurrency_bounded_by_workers() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
        let registry = TaskRegistry::builtin().with(FnTask::new("track", move |args: &[Value]| {
            let now = r.fetch_add(1, Ordering::SeqCst) + 1;
            p.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            r.fetch_sub(1, Ordering::SeqCst);
            Ok(args[0].clone())
        }));

        let outcome = executor_with(registry)
            .run("track", &TaskArgs::ints(0..8), 2)
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_task_failure_propagates() {
        let registry = TaskRegistry::builtin().with(FnTask::new("odd_fails", |args: &[Value]| {
            match args[0].as_int() {
                Some(n) if n % 2 == 1 => Err(TaskError::Failed(format!("odd input {}", n))),
                _ => Ok(args[0].clone()),
            }
        }));

        let err = executor_with(registry)
            .run("odd_fails", &TaskArgs::ints([2, 3, 4]), 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Task(TaskError::Failed(m)) if m == "odd input 3"));
    }

    #[tokio::test]
    async fn test_panic_is_reported() {
        let registry = TaskRegistry::builtin().with(FnTask::new("explode", |_: &[Value]| {
            panic!("thread task exploded")
        }));

        let err = executor_with(registry)
            .run("explode", &TaskArgs::ints([1]), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TaskPanicked(m) if m.contains("exploded")));
    }
}
