// Run outcomes and comparison reports

use super::value::Value;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Results of one runner invocation, in submission order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub results: Vec<Value>,
    /// Wall-clock seconds, never exactly zero
    pub elapsed_secs: f64,
}

impl RunOutcome {
    pub fn new(results: Vec<Value>, elapsed_secs: f64) -> Self {
        Self {
            results,
            elapsed_secs,
        }
    }
}

/// Workload category accepted by the comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskCategory {
    #[serde(rename = "CPU-bound")]
    CpuBound,
    #[serde(rename = "I/O-bound")]
    IoBound,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::CpuBound => "CPU-bound",
            TaskCategory::IoBound => "I/O-bound",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CPU-bound" => Ok(TaskCategory::CpuBound),
            "I/O-bound" => Ok(TaskCategory::IoBound),
            other => Err(AppError::UnknownCategory(other.to_string())),
        }
    }
}

/// Timings of one comparison across the three strategies
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub task_category: TaskCategory,
    pub workers: i64,
    pub sequential: f64,
    pub threading: f64,
    pub multiprocessing: f64,
    pub threading_speedup: f64,
    pub multiprocessing_speedup: f64,
    pub measured_at: DateTime<Utc>,
}

/// Sequential time divided by concurrent time, or 0 when the latter is not positive
pub fn speedup(sequential_secs: f64, concurrent_secs: f64) -> f64 {
    if concurrent_secs > 0.0 {
        sequential_secs / concurrent_secs
    } else {
        0.0
    }
}

/// Outcome of the counter contention demonstration
#[derive(Debug, Clone, Serialize)]
pub struct ContentionReport {
    pub iterations: u64,
    pub threads: usize,
    pub single_thread_secs: f64,
    pub multi_thread_secs: f64,
    pub speedup: f64,
    /// Expected total of the multi-threaded phase (`iterations` rounded down to a multiple of `threads`)
    pub expected_count: u64,
    /// Counter value after the unsynchronized phase; may fall short of `expected_count`
    pub racy_final_count: u64,
    pub locked_secs: f64,
    pub locked_final_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("CPU-bound".parse::<TaskCategory>().unwrap(), TaskCategory::CpuBound);
        assert_eq!("I/O-bound".parse::<TaskCategory>().unwrap(), TaskCategory::IoBound);
        assert!(matches!(
            "INVALID_TYPE".parse::<TaskCategory>(),
            Err(AppError::UnknownCategory(_))
        ));
        assert!("cpu-bound".parse::<TaskCategory>().is_err());
    }

    #[test]
    fn test_speedup_guards_non_positive() {
        assert_eq!(speedup(2.0, 1.0), 2.0);
        assert_eq!(speedup(2.0, 0.0), 0.0);
        assert_eq!(speedup(2.0, -1.0), 0.0);
    }

    #[test]
    fn test_category_serializes_label() {
        let json = serde_json::to_string(&TaskCategory::IoBound).unwrap();
        assert_eq!(json, "\"I/O-bound\"");
    }
}
