// Wall-clock measurement shared by every runner

use crate::port::TimeProvider;
use std::time::Instant;
use tracing::warn;

/// Substituted when a measured interval is exactly zero, so speedup ratios never divide by zero
pub const MIN_ELAPSED_SECS: f64 = 0.0001;

/// Floor an elapsed time at [`MIN_ELAPSED_SECS`] when it measured exactly zero
pub fn floor_elapsed(elapsed_secs: f64) -> f64 {
    if elapsed_secs == 0.0 {
        warn!(
            floor_secs = %MIN_ELAPSED_SECS,
            "Measured zero elapsed time, substituting floor"
        );
        MIN_ELAPSED_SECS
    } else {
        elapsed_secs
    }
}

/// Measures elapsed seconds from construction
pub struct Stopwatch<'a> {
    time_provider: &'a dyn TimeProvider,
    started: Instant,
}

impl<'a> Stopwatch<'a> {
    pub fn start(time_provider: &'a dyn TimeProvider) -> Self {
        Self {
            time_provider,
            started: time_provider.now(),
        }
    }

    /// Seconds since start, floored
    pub fn elapsed_secs(&self) -> f64 {
        let now = self.time_provider.now();
        floor_elapsed(now.saturating_duration_since(self.started).as_secs_f64())
    }
}
