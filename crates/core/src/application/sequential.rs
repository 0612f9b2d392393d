// Sequential runner - the baseline every pool is compared against

use crate::application::timing::Stopwatch;
use crate::domain::{RunOutcome, TaskArgs, TaskError, TaskRegistry, Value};
use crate::error::Result;
use crate::port::TimeProvider;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs argument sets one after another on the calling thread
pub struct SequentialRunner {
    registry: Arc<TaskRegistry>,
    time_provider: Arc<dyn TimeProvider>,
}

impl SequentialRunner {
    pub fn new(registry: Arc<TaskRegistry>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            registry,
            time_provider,
        }
    }

    /// Apply `task` to each argument set in order
    ///
    /// Blocks the calling thread for the whole run.
    ///
    /// # Errors
    /// - AppError::NotCallable if `task` is not registered (before any work)
    /// - AppError::Task on the first failing call
    pub fn run(&self, task: &str, args: &[TaskArgs]) -> Result<RunOutcome> {
        let callable = self.registry.resolve(task)?;

        debug!(task = %task, tasks = args.len(), "Starting sequential run");
        let stopwatch = Stopwatch::start(self.time_provider.as_ref());

        let results = args
            .iter()
            .map(|a| callable.call(a.as_slice()))
            .collect::<std::result::Result<Vec<Value>, TaskError>>()?;

        let elapsed_secs = stopwatch.elapsed_secs();
        info!(
            task = %task,
            tasks = results.len(),
            elapsed_secs = %elapsed_secs,
            "Sequential run completed"
        );

        Ok(RunOutcome::new(results, elapsed_secs))
    }
}
