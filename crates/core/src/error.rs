// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Task is not callable: '{0}' is not a registered task")]
    NotCallable(String),

    #[error("Worker count must be a positive integer, got {0}")]
    InvalidWorkerCount(i64),

    #[error("task_type must be either 'CPU-bound' or 'I/O-bound', got '{0}'")]
    UnknownCategory(String),

    #[error("Task error: {0}")]
    Task(#[from] crate::domain::TaskError),

    #[error("Task panicked: {0}")]
    TaskPanicked(String),

    #[error("Execution error: {0}")]
    Execution(#[from] crate::port::ExecutionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
