// Task registry - resolves task names to callable tasks

use super::task::{CpuIntensiveTask, IdentityTask, IoIntensiveTask, Task};
use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Name-indexed set of callable tasks
///
/// Worker processes build the same registry, so only tasks registered in
/// [`TaskRegistry::builtin`] can cross a process boundary.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, Arc<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the demo workloads
    pub fn builtin() -> Self {
        Self::new()
            .with(CpuIntensiveTask)
            .with(IoIntensiveTask)
            .with(IdentityTask)
    }

    /// Add a task, replacing any task with the same name
    pub fn with(mut self, task: impl Task + 'static) -> Self {
        self.register(Arc::new(task));
        self
    }

    pub fn register(&mut self, task: Arc<dyn Task>) {
        self.tasks.insert(task.name().to_string(), task);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Task>> {
        self.tasks.get(name).cloned()
    }

    /// Resolve a task by name
    ///
    /// # Errors
    /// - AppError::NotCallable if no task is registered under `name`
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Task>> {
        self.get(name)
            .ok_or_else(|| AppError::NotCallable(name.to_string()))
    }

    /// Registered task names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Value;
    use crate::domain::FnTask;

    #[test]
    fn test_builtin_names() {
        let registry = TaskRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["cpu_intensive_task", "identity", "io_intensive_task"]
        );
    }

    #[test]
    fn test_resolve_unknown_is_not_callable() {
        let registry = TaskRegistry::builtin();
        let err = registry.resolve("not a function").err().unwrap();
        assert!(matches!(err, AppError::NotCallable(name) if name == "not a function"));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = TaskRegistry::builtin().with(FnTask::new("identity", |_: &[Value]| {
            Ok(Value::Int(0))
        }));
        let task = registry.resolve("identity").unwrap();
        assert_eq!(task.call(&[Value::Int(9)]).unwrap(), Value::Int(0));
    }
}
