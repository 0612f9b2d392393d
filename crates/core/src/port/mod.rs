// Port Layer - Interfaces for external dependencies

pub mod pool_executor;
pub mod reporter;
pub mod system_probe;
pub mod time_provider;

// Re-exports
pub use pool_executor::{validate_workers, ExecutionError, PoolExecutor, PoolKind};
pub use reporter::Reporter;
pub use system_probe::{SystemMetrics, SystemProbe};
pub use time_provider::{SystemTimeProvider, TimeProvider};
