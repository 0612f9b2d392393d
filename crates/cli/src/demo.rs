//! Full demonstration: contention demo, then one comparison per workload category

use std::sync::Arc;

use anyhow::{Context, Result};
use parabench_core::application::ContentionDemo;
use parabench_core::domain::{CpuIntensiveTask, IoIntensiveTask, PerformanceReport, TaskCategory};
use parabench_core::port::{Reporter, SystemProbe, SystemTimeProvider};
use parabench_core::BenchConfig;
use tracing::info;

use crate::bench::Bench;

/// Reports produced by one demo run
#[derive(Debug)]
pub struct DemoSummary {
    pub workers: usize,
    pub cpu: PerformanceReport,
    pub io: PerformanceReport,
}

pub async fn run_demo(
    bench: &Bench,
    probe: &dyn SystemProbe,
    config: &BenchConfig,
    reporter: Arc<dyn Reporter>,
) -> Result<DemoSummary> {
    config.validate()?;

    reporter.heading("Concurrency Strategy Analysis");
    reporter.line("=============================");

    let metrics = probe.get_metrics().await;
    reporter.line(&format!("System has {} CPU cores", metrics.cpu_count));

    let contention = ContentionDemo::new(
        config.contention_iterations,
        config.contention_threads,
        Arc::clone(&reporter),
        Arc::new(SystemTimeProvider),
    );
    // The demo spins OS threads and blocks until they finish
    tokio::task::spawn_blocking(move || contention.run())
        .await
        .context("Contention demo did not complete")??;

    let workers = config.workers_for(metrics.cpu_count);
    info!(workers, cpu_count = metrics.cpu_count, "Running comparisons");

    let cpu = bench
        .compare_performance(
            TaskCategory::CpuBound.as_str(),
            CpuIntensiveTask::NAME,
            &config.cpu_args,
            workers as i64,
        )
        .await
        .context("CPU-bound comparison failed")?;

    let io = bench
        .compare_performance(
            TaskCategory::IoBound.as_str(),
            IoIntensiveTask::NAME,
            &config.io_args,
            workers as i64,
        )
        .await
        .context("I/O-bound comparison failed")?;

    reporter.heading("Conclusions:");
    reporter.line("1. A global execution lock would stop threads from speeding up CPU-bound tasks; Rust threads have none");
    reporter.line("2. For I/O-bound tasks, threads overlap their waiting and perform well");
    reporter.line("3. Process pools sidestep any shared lock but pay for startup and message passing");
    reporter.line("4. Prefer threads for I/O-bound work; use processes when isolation or a per-process lock demands it");

    Ok(DemoSummary { workers, cpu, io })
}
