// Application Layer - Runners, comparison and demonstrations

pub mod comparator;
pub mod contention;
pub mod sequential;
pub mod thread_pool;
pub mod timing;
pub mod worker;

// Re-exports
pub use comparator::Comparator;
pub use contention::ContentionDemo;
pub use sequential::SequentialRunner;
pub use thread_pool::ThreadPoolExecutor;
pub use timing::{Stopwatch, MIN_ELAPSED_SECS};
