// System resource probe port
// reason: async-trait for adapters that sample over time
use async_trait::async_trait;

/// System resource metrics
#[derive(Debug, Clone)]
pub struct SystemMetrics {
    /// Logical CPUs available to the process
    pub cpu_count: usize,
    pub cpu_usage_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
}

/// System probe port
///
/// Used to size worker pools and to print the host summary in the demo.
#[async_trait]
pub trait SystemProbe: Send + Sync {
    /// Get current system metrics
    ///
    /// # Example
    /// ```text
    /// let metrics = probe.get_metrics().await;
    /// println!("System has {} CPU cores", metrics.cpu_count);
    /// ```
    async fn get_metrics(&self) -> SystemMetrics;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Mock SystemProbe for testing
    pub struct MockSystemProbe {
        metrics: SystemMetrics,
    }

    impl MockSystemProbe {
        pub fn new(cpu_count: usize) -> Self {
            Self {
                metrics: SystemMetrics {
                    cpu_count,
                    cpu_usage_percent: 10.0,
                    memory_used_mb: 1024,
                    memory_total_mb: 2048,
                },
            }
        }
    }

    #[async_trait]
    impl SystemProbe for MockSystemProbe {
        async fn get_metrics(&self) -> SystemMetrics {
            self.metrics.clone()
        }
    }
}
