//! Parabench - sequential vs thread pool vs process pool, on CPU- and I/O-bound work

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tabled::{Table, Tabled};
use tracing::info;

use parabench_cli::args::parse_args_list;
use parabench_cli::demo::run_demo;
use parabench_cli::logging::init_logging;
use parabench_cli::{Bench, ConsoleReporter};
use parabench_core::application::{worker, ContentionDemo};
use parabench_core::config::{
    DEFAULT_CONTENTION_ITERATIONS, DEFAULT_CONTENTION_THREADS, DEFAULT_MAX_WORKERS,
};
use parabench_core::domain::{PerformanceReport, TaskRegistry};
use parabench_core::port::{Reporter, SystemTimeProvider};
use parabench_core::BenchConfig;
use parabench_infra_system::{SystemProbeImpl, WorkerCommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "parabench")]
#[command(about = "Compare sequential, thread pool and process pool execution", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for the demo run when no subcommand is given
    #[command(flatten)]
    demo: DemoArgs,

    /// Program launched for process pool workers (default: this executable)
    #[arg(long, global = true, env = "PARABENCH_WORKER_PROGRAM")]
    worker_program: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full demonstration (default)
    Demo(DemoArgs),

    /// Compare the three strategies on one workload
    Compare {
        /// Task category: "CPU-bound" or "I/O-bound"
        #[arg(short, long)]
        category: String,

        /// Registered task name (e.g. cpu_intensive_task)
        #[arg(short, long)]
        task: String,

        /// Pool size for both pools
        #[arg(short, long, default_value = "4", allow_negative_numbers = true)]
        workers: i64,

        /// Argument sets, comma separated; use ':' inside a set for tuples
        #[arg(short, long)]
        args: String,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run only the counter contention demonstration
    Contention {
        #[arg(long, env = "PARABENCH_CONTENTION_ITERATIONS", default_value_t = DEFAULT_CONTENTION_ITERATIONS)]
        iterations: u64,

        #[arg(long, default_value_t = DEFAULT_CONTENTION_THREADS)]
        threads: usize,
    },

    /// Serve process pool requests on stdin/stdout
    #[command(hide = true)]
    Worker,
}

#[derive(Args)]
struct DemoArgs {
    /// Upper limit on pool size (actual size is min(this, cpu count))
    #[arg(long, env = "PARABENCH_MAX_WORKERS", default_value_t = DEFAULT_MAX_WORKERS)]
    max_workers: usize,

    /// Counter increments in the contention demo
    #[arg(long, env = "PARABENCH_CONTENTION_ITERATIONS", default_value_t = DEFAULT_CONTENTION_ITERATIONS)]
    iterations: u64,
}

#[derive(Tabled)]
struct StrategyRow {
    strategy: &'static str,
    seconds: String,
    speedup: String,
}

fn report_table(report: &PerformanceReport) -> String {
    let rows = vec![
        StrategyRow {
            strategy: "sequential",
            seconds: format!("{:.4}", report.sequential),
            speedup: "1.00x".to_string(),
        },
        StrategyRow {
            strategy: "threading",
            seconds: format!("{:.4}", report.threading),
            speedup: format!("{:.2}x", report.threading_speedup),
        },
        StrategyRow {
            strategy: "multiprocessing",
            seconds: format!("{:.4}", report.multiprocessing),
            speedup: format!("{:.2}x", report.multiprocessing_speedup),
        },
    ];
    Table::new(rows).to_string()
}

fn worker_command(program: Option<PathBuf>) -> Result<WorkerCommand> {
    match program {
        Some(path) => Ok(WorkerCommand::new(path)),
        None => WorkerCommand::current_exe().context("Cannot locate the parabench executable"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Demo(cli.demo));

    info!("Parabench v{} starting...", VERSION);
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter);

    match command {
        Commands::Demo(DemoArgs {
            max_workers,
            iterations,
        }) => {
            let bench = Bench::new(worker_command(cli.worker_program)?, Arc::clone(&reporter));
            let config = BenchConfig {
                max_workers,
                contention_iterations: iterations,
                ..Default::default()
            };
            let probe = SystemProbeImpl::new();
            run_demo(&bench, &probe, &config, reporter).await?;
        }

        Commands::Compare {
            category,
            task,
            workers,
            args,
            json,
        } => {
            let bench = Bench::new(worker_command(cli.worker_program)?, Arc::clone(&reporter));
            let args_list = parse_args_list(&args);
            let report = bench
                .compare_performance(&category, &task, &args_list, workers)
                .await?;

            println!();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report_table(&report));
            }
        }

        Commands::Contention {
            iterations,
            threads,
        } => {
            let demo = ContentionDemo::new(
                iterations,
                threads,
                Arc::clone(&reporter),
                Arc::new(SystemTimeProvider),
            );
            let report = tokio::task::spawn_blocking(move || demo.run()).await??;
            if report.racy_final_count < report.expected_count {
                println!(
                    "{}",
                    format!(
                        "{} updates lost to the data race",
                        report.expected_count - report.racy_final_count
                    )
                    .yellow()
                );
            }
        }

        Commands::Worker => {
            // Stdout belongs to the protocol; nothing else may print there
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            worker::serve(&TaskRegistry::builtin(), stdin.lock(), stdout.lock())
                .context("Worker protocol failure")?;
        }
    }

    Ok(())
}
