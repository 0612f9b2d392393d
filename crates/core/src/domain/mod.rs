// Domain Layer - Tasks, values and reports

pub mod error;
pub mod primes;
pub mod registry;
pub mod report;
pub mod task;
pub mod value;

// Re-exports
pub use error::TaskError;
pub use primes::{cpu_intensive_task, is_prime};
pub use registry::TaskRegistry;
pub use report::{speedup, ContentionReport, PerformanceReport, RunOutcome, TaskCategory};
pub use task::{
    io_intensive_task, CpuIntensiveTask, FnTask, IdentityTask, IoIntensiveTask, Task,
};
pub use value::{TaskArgs, Value};
