// Worker - serve loop run inside each pool worker process

mod panic_guard;
pub mod protocol;

pub use panic_guard::{execute_guarded, panic_message, PanicGuardResult};
pub use protocol::{WorkerOutcome, WorkerRequest, WorkerResponse};

use crate::domain::TaskRegistry;
use crate::error::Result;
use std::io::{BufRead, Write};
use std::panic::AssertUnwindSafe;
use tracing::{debug, info, warn};

/// Serve task requests until `reader` reaches EOF
///
/// Each request line produces exactly one response line, flushed immediately.
/// Task failures (including unknown tasks and panics) are answered with an
/// `err` outcome; only I/O and malformed requests end the loop with an error.
///
/// Returns the number of requests served.
pub fn serve<R: BufRead, W: Write>(registry: &TaskRegistry, reader: R, mut writer: W) -> Result<usize> {
    info!(pid = std::process::id(), "Worker started");
    let mut served = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request: WorkerRequest = serde_json::from_str(&line)?;
        debug!(id = request.id, task = %request.task, "Worker received request");

        let response = WorkerResponse {
            id: request.id,
            outcome: handle(registry, &request),
        };

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        served += 1;
    }

    info!(pid = std::process::id(), served, "Worker input closed, exiting");
    Ok(served)
}

fn handle(registry: &TaskRegistry, request: &WorkerRequest) -> WorkerOutcome {
    let task = match registry.resolve(&request.task) {
        Ok(task) => task,
        Err(e) => {
            warn!(task = %request.task, "Worker asked to run unknown task");
            return WorkerOutcome::Err(e.to_string());
        }
    };

    match execute_guarded(AssertUnwindSafe(|| task.call(request.args.as_slice()))) {
        PanicGuardResult::Success(result) => result.into(),
        PanicGuardResult::Panicked(msg) => WorkerOutcome::Err(format!("Task panicked: {}", msg)),
    }
}
