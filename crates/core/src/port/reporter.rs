// Reporter Port - human-readable progress output

/// Sink for the descriptive console output of the demo
///
/// The text is informational only; nothing parses it.
pub trait Reporter: Send + Sync {
    /// Section heading (e.g. "CPU-bound task (4 workers):")
    fn heading(&self, text: &str);

    /// One progress line under the current heading
    fn line(&self, text: &str);
}

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Reporter that records everything it is given
    #[derive(Default)]
    pub struct RecordingReporter {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Recorded output; headings are prefixed with "# "
        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }

        pub fn contains(&self, needle: &str) -> bool {
            self.lines().iter().any(|l| l.contains(needle))
        }
    }

    impl Reporter for RecordingReporter {
        fn heading(&self, text: &str) {
            self.lines.lock().unwrap().push(format!("# {}", text));
        }

        fn line(&self, text: &str) {
            self.lines.lock().unwrap().push(text.to_string());
        }
    }
}
