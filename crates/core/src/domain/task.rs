// Task abstraction and the built-in demo workloads

use super::error::TaskError;
use super::primes::cpu_intensive_task;
use super::value::Value;
use std::time::Duration;

/// A named unit of work callable with positional arguments
///
/// Tasks are identified by name so the same task can be resolved inside a
/// worker process.
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    /// Call the task with unpacked positional arguments
    fn call(&self, args: &[Value]) -> Result<Value, TaskError>;
}

/// I/O-bound task: block for `seconds`, then describe the wait
///
/// Negative or NaN durations sleep for zero. Durations too large for
/// [`Duration`] (including infinity) block indefinitely.
pub fn io_intensive_task(seconds: f64) -> String {
    wait_and_describe(&Value::Float(seconds), clamped_duration(seconds))
}

fn clamped_duration(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

fn wait_and_describe(rendered: &Value, duration: Duration) -> String {
    std::thread::sleep(duration);
    format!("Completed I/O operation that took {} seconds", rendered)
}

fn single_arg<'a>(task: &str, args: &'a [Value]) -> Result<&'a Value, TaskError> {
    match args {
        [value] => Ok(value),
        _ => Err(TaskError::invalid_arguments(
            task,
            format!("expected 1 argument, got {}", args.len()),
        )),
    }
}

/// Registered form of [`cpu_intensive_task`]
pub struct CpuIntensiveTask;

impl CpuIntensiveTask {
    pub const NAME: &'static str = "cpu_intensive_task";
}

impl Task for CpuIntensiveTask {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn call(&self, args: &[Value]) -> Result<Value, TaskError> {
        let n = single_arg(Self::NAME, args)?
            .as_int()
            .ok_or_else(|| TaskError::invalid_arguments(Self::NAME, "n must be an integer"))?;
        Ok(Value::Int(cpu_intensive_task(n)))
    }
}

/// Registered form of [`io_intensive_task`]
pub struct IoIntensiveTask;

impl IoIntensiveTask {
    pub const NAME: &'static str = "io_intensive_task";
}

impl Task for IoIntensiveTask {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn call(&self, args: &[Value]) -> Result<Value, TaskError> {
        let value = single_arg(Self::NAME, args)?;
        let seconds = value
            .as_f64()
            .ok_or_else(|| TaskError::invalid_arguments(Self::NAME, "seconds must be a number"))?;
        let duration = Duration::try_from_secs_f64(seconds).map_err(|_| {
            TaskError::invalid_arguments(
                Self::NAME,
                format!("seconds must be a non-negative finite duration, got {}", value),
            )
        })?;
        Ok(Value::Str(wait_and_describe(value, duration)))
    }
}

/// Returns its single argument unchanged
pub struct IdentityTask;

impl IdentityTask {
    pub const NAME: &'static str = "identity";
}

impl Task for IdentityTask {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn call(&self, args: &[Value]) -> Result<Value, TaskError> {
        single_arg(Self::NAME, args).cloned()
    }
}

/// Adapts a closure into a [`Task`]
pub struct FnTask<F> {
    name: String,
    func: F,
}

impl<F> FnTask<F>
where
    F: Fn(&[Value]) -> Result<Value, TaskError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Task for FnTask<F>
where
    F: Fn(&[Value]) -> Result<Value, TaskError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &[Value]) -> Result<Value, TaskError> {
        (self.func)(args)
    }
}
