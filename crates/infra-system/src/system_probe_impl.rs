// System probe implementation
// reason: sysinfo for cross-platform CPU and memory information
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use sysinfo::System;
use tracing::debug;

use parabench_core::port::system_probe::{SystemMetrics, SystemProbe};

/// System probe implementation using sysinfo
pub struct SystemProbeImpl {
    system: Arc<Mutex<System>>,
}

impl SystemProbeImpl {
    /// Create a new system probe
    ///
    /// # Example
    /// ```ignore
    /// let probe = SystemProbeImpl::new();
    /// ```
    pub fn new() -> Self {
        Self {
            system: Arc::new(Mutex::new(System::new_all())),
        }
    }
}

impl Default for SystemProbeImpl {
    fn default() -> Self {
        Self::new()
    }
}

/// sysinfo can report no CPUs in restricted containers; fall back to the scheduler's view
fn logical_cpus(reported: usize) -> usize {
    if reported > 0 {
        return reported;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[async_trait]
impl SystemProbe for SystemProbeImpl {
    async fn get_metrics(&self) -> SystemMetrics {
        let mut sys = self.system.lock().unwrap_or_else(PoisonError::into_inner);

        sys.refresh_cpu();
        sys.refresh_memory();

        let cpu_count = logical_cpus(sys.cpus().len());
        let cpu_usage_percent = sys.global_cpu_info().cpu_usage();
        let memory_used_mb = sys.used_memory() / 1024 / 1024;
        let memory_total_mb = sys.total_memory() / 1024 / 1024;

        debug!(
            cpus = %cpu_count,
            cpu = %cpu_usage_percent,
            mem_used_mb = %memory_used_mb,
            mem_total_mb = %memory_total_mb,
            "System metrics collected"
        );

        SystemMetrics {
            cpu_count,
            cpu_usage_percent,
            memory_used_mb,
            memory_total_mb,
        }
    }
}
