// End-to-end runner tests
// The process pool launches the built `parabench` binary in worker mode.

use std::sync::Arc;

use parabench_cli::Bench;
use parabench_core::domain::{
    cpu_intensive_task, io_intensive_task, is_prime, TaskArgs, TaskError, Value,
};
use parabench_core::port::reporter::mocks::RecordingReporter;
use parabench_core::AppError;
use parabench_infra_system::WorkerCommand;

const CPU: &str = "cpu_intensive_task";
const IO: &str = "io_intensive_task";

fn bench() -> (Bench, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    let bench = Bench::new(
        WorkerCommand::new(env!("CARGO_BIN_EXE_parabench")),
        reporter.clone(),
    );
    (bench, reporter)
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

fn sorted(values: Vec<Value>) -> Vec<i64> {
    let mut ints: Vec<i64> = values.iter().filter_map(Value::as_int).collect();
    ints.sort_unstable();
    ints
}

#[test]
fn test_prime_and_task_functions() {
    for n in [2, 3, 5, 11, 997] {
        assert!(is_prime(n), "{} should be prime", n);
    }
    for n in [0, 1, 4, 9] {
        assert!(!is_prime(n), "{} should not be prime", n);
    }

    assert_eq!(cpu_intensive_task(0), 0);
    assert_eq!(cpu_intensive_task(1), 0);
    assert_eq!(cpu_intensive_task(2), 0);
    assert_eq!(cpu_intensive_task(3), 5);
    assert_eq!(cpu_intensive_task(10), 17);
    assert_eq!(cpu_intensive_task(15), 41);

    assert!(io_intensive_task(0.0).contains("0 seconds"));
    let result = io_intensive_task(0.01);
    assert!(result.contains("Completed I/O operation"));
    assert!(result.contains("0.01 seconds"));
}

#[test]
fn test_sequential_execution() {
    let (bench, _) = bench();

    let outcome = bench.run_sequential(CPU, &TaskArgs::ints([5, 10, 15])).unwrap();
    assert_eq!(outcome.results, ints(&[10, 17, 41]));
    assert!(outcome.elapsed_secs > 0.0);

    let empty = bench.run_sequential(CPU, &[]).unwrap();
    assert!(empty.results.is_empty());
}

#[tokio::test]
async fn test_threading_execution() {
    let (bench, _) = bench();
    let args = TaskArgs::ints([5, 10, 15]);

    let outcome = bench.run_threading(CPU, &args, 2).await.unwrap();
    assert_eq!(sorted(outcome.results), vec![10, 17, 41]);
    assert!(outcome.elapsed_secs > 0.0);

    let empty = bench.run_threading(CPU, &[], 2).await.unwrap();
    assert!(empty.results.is_empty());

    let single = bench.run_threading(CPU, &args, 1).await.unwrap();
    assert_eq!(sorted(single.results), vec![10, 17, 41]);

    let many = bench.run_threading(CPU, &TaskArgs::ints([5]), 5).await.unwrap();
    assert_eq!(many.results, ints(&[10]));
}

#[tokio::test]
async fn test_multiprocessing_execution() {
    let (bench, _) = bench();
    let args = TaskArgs::ints([5, 10, 15]);

    let outcome = bench.run_multiprocessing(CPU, &args, 2).await.unwrap();
    // Submission order is preserved even though two processes share the work
    assert_eq!(outcome.results, ints(&[10, 17, 41]));
    assert!(outcome.elapsed_secs > 0.0);

    let empty = bench.run_multiprocessing(CPU, &[], 2).await.unwrap();
    assert!(empty.results.is_empty());
    assert!(empty.elapsed_secs > 0.0);

    let single = bench.run_multiprocessing(CPU, &args, 1).await.unwrap();
    assert_eq!(sorted(single.results), vec![10, 17, 41]);

    let many = bench.run_multiprocessing(CPU, &TaskArgs::ints([5]), 5).await.unwrap();
    assert_eq!(many.results, ints(&[10]));
}

#[tokio::test]
async fn test_multiprocessing_results_invariant_to_worker_count() {
    let (bench, _) = bench();
    let args = TaskArgs::ints([15, 5, 10, 2, 30]);

    let single = bench.run_multiprocessing(CPU, &args, 1).await.unwrap();
    let many = bench.run_multiprocessing(CPU, &args, 5).await.unwrap();
    assert_eq!(single.results, many.results);
    assert_eq!(many.results, ints(&[41, 10, 17, 0, 129]));
}

#[tokio::test]
async fn test_runners_agree() {
    let (bench, _) = bench();
    let args = TaskArgs::ints([100, 2, 50, 7, 30, 1, 999]);

    let sequential = bench.run_sequential(CPU, &args).unwrap();
    let threads = bench.run_threading(CPU, &args, 3).await.unwrap();
    let processes = bench.run_multiprocessing(CPU, &args, 3).await.unwrap();

    assert_eq!(sequential.results, threads.results);
    assert_eq!(sequential.results, processes.results);
}

#[tokio::test]
async fn test_io_task_through_processes() {
    let (bench, _) = bench();
    let outcome = bench
        .run_multiprocessing(IO, &TaskArgs::floats([0.01, 0.01]), 2)
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    for result in &outcome.results {
        assert_eq!(
            result.as_str(),
            Some("Completed I/O operation that took 0.01 seconds")
        );
    }
}

#[tokio::test]
async fn test_error_handling() {
    let (bench, _) = bench();
    let args = TaskArgs::ints([1, 2, 3]);

    assert!(matches!(
        bench.run_sequential("not a function", &args),
        Err(AppError::NotCallable(_))
    ));
    assert!(matches!(
        bench.run_threading("not a function", &args, 2).await,
        Err(AppError::NotCallable(_))
    ));
    assert!(matches!(
        bench.run_multiprocessing("not a function", &args, 2).await,
        Err(AppError::NotCallable(_))
    ));

    for workers in [0, -1] {
        assert!(matches!(
            bench.run_threading("identity", &args, workers).await,
            Err(AppError::InvalidWorkerCount(_))
        ));
    }
    for workers in [0, -2] {
        assert!(matches!(
            bench.run_multiprocessing("identity", &args, workers).await,
            Err(AppError::InvalidWorkerCount(_))
        ));
    }

    assert!(matches!(
        bench.compare_performance("INVALID_TYPE", "identity", &args, 2).await,
        Err(AppError::UnknownCategory(_))
    ));
}

#[tokio::test]
async fn test_task_failure_inside_worker_propagates() {
    let (bench, _) = bench();
    // A string is not a valid upper bound; the worker reports the failure back
    let args = vec![TaskArgs::int(5), TaskArgs::Single(Value::Str("ten".to_string()))];

    let err = bench.run_multiprocessing(CPU, &args, 2).await.unwrap_err();
    assert!(matches!(err, AppError::Task(TaskError::Failed(m)) if m.contains("integer")));
}

#[tokio::test]
async fn test_compare_performance_report() {
    let (bench, reporter) = bench();

    let report = bench
        .compare_performance("CPU-bound", CPU, &TaskArgs::ints([1_000, 2_000]), 2)
        .await
        .unwrap();

    assert!(report.sequential > 0.0);
    assert!(report.threading > 0.0);
    assert!(report.multiprocessing > 0.0);
    assert!(report.threading_speedup > 0.0);
    assert!(report.multiprocessing_speedup > 0.0);

    let json = serde_json::to_value(&report).unwrap();
    for key in [
        "sequential",
        "threading",
        "multiprocessing",
        "threading_speedup",
        "multiprocessing_speedup",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }

    assert!(reporter.contains("CPU-bound task (2 workers):"));
    assert!(reporter.contains("- Multiprocessing: "));
}
