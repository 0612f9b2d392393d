// Time Provider Port (for testability)

use std::time::Instant;

/// Monotonic clock interface (allows freezing time in tests)
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> Instant;
}

/// System monotonic clock (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

pub mod mocks {
    use super::*;

    /// Clock that never advances; every measured interval is exactly zero
    pub struct FrozenTimeProvider {
        instant: Instant,
    }

    impl FrozenTimeProvider {
        pub fn new() -> Self {
            Self {
                instant: Instant::now(),
            }
        }
    }

    impl Default for FrozenTimeProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TimeProvider for FrozenTimeProvider {
        fn now(&self) -> Instant {
            self.instant
        }
    }
}
