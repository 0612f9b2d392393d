// Worker protocol - JSON lines exchanged with pool worker processes
//
// Parent -> worker: {"id":0,"task":"cpu_intensive_task","args":100}
// Worker -> parent: {"id":0,"outcome":{"ok":1060}} or {"id":0,"outcome":{"err":"..."}}

use crate::domain::{TaskArgs, TaskError, Value};
use serde::{Deserialize, Serialize};

/// One task submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRequest {
    /// Submission index in the caller's argument list
    pub id: usize,
    pub task: String,
    pub args: TaskArgs,
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub id: usize,
    pub outcome: WorkerOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerOutcome {
    Ok(Value),
    Err(String),
}

impl WorkerOutcome {
    /// Remote failures come back as TaskError::Failed carrying the worker's message
    pub fn into_result(self) -> Result<Value, TaskError> {
        match self {
            WorkerOutcome::Ok(value) => Ok(value),
            WorkerOutcome::Err(message) => Err(TaskError::Failed(message)),
        }
    }
}

impl From<Result<Value, TaskError>> for WorkerOutcome {
    fn from(result: Result<Value, TaskError>) -> Self {
        match result {
            Ok(value) => WorkerOutcome::Ok(value),
            Err(e) => WorkerOutcome::Err(e.to_string()),
        }
    }
}
