// Parabench Infrastructure - System Adapters
// Implements: PoolExecutor (processes), SystemProbe

pub mod process_pool;
pub mod system_probe_impl;

pub use process_pool::{ProcessPoolExecutor, WorkerCommand, WORKER_SUBCOMMAND};
pub use system_probe_impl::SystemProbeImpl;
