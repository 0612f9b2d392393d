// Domain Error Types

use thiserror::Error;

/// Failure raised from inside a task call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    #[error("Invalid arguments for {task}: {reason}")]
    InvalidArguments { task: String, reason: String },

    #[error("Task failed: {0}")]
    Failed(String),
}

impl TaskError {
    pub fn invalid_arguments(task: impl Into<String>, reason: impl Into<String>) -> Self {
        TaskError::InvalidArguments {
            task: task.into(),
            reason: reason.into(),
        }
    }
}
