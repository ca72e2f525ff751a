use std::io::Write;

use lattice_offset::{ProgressSink, ProgressUpdate};

/// Progress sink that redraws a single status line on stderr
///
/// Only repaints when the whole percentage or the phase changes.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    last: Option<(u8, &'static str)>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminate the status line so later output starts on a fresh line
    pub fn finish(&mut self) {
        if self.last.take().is_some() {
            eprintln!();
        }
    }

    fn render(update: &ProgressUpdate) -> String {
        format!(
            "[{}] {}: {:>3}% ({}/{})",
            update.strategy,
            update.phase.description(),
            update.percent(),
            update.processed,
            update.total
        )
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, update: &ProgressUpdate) {
        let key = (update.percent(), update.phase.description());
        if self.last == Some(key) {
            return;
        }
        self.last = Some(key);
        eprint!("\r{}", Self::render(update));
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_offset::{SearchPhase, SearchStrategy};

    #[test]
    fn test_render_line() {
        let update = ProgressUpdate {
            strategy: SearchStrategy::HashBased,
            phase: SearchPhase::Histogram,
            fraction: 0.25,
            processed: 5,
            total: 20,
        };
        let line = ConsoleProgress::render(&update);
        assert!(line.starts_with("[hash-based] "));
        assert!(line.ends_with(" 25% (5/20)"));
    }

    #[test]
    fn test_repaints_only_on_change() {
        let mut progress = ConsoleProgress::new();
        let update = ProgressUpdate {
            strategy: SearchStrategy::BruteForce,
            phase: SearchPhase::CuboidScan,
            fraction: 0.5,
            processed: 1,
            total: 2,
        };
        progress.report(&update);
        assert_eq!(progress.last, Some((50, SearchPhase::CuboidScan.description())));
        progress.finish();
        assert!(progress.last.is_none());
    }
}
