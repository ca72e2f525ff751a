use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Cooperative cancellation request for a search run.
///
/// The engine samples it between work batches, and a configured pause
/// between batches ends as soon as cancellation is requested. It can be set
/// from any thread, for example a Ctrl-C handler.
#[derive(Debug, Default)]
pub struct CancelToken {
    requested: Mutex<bool>,
    wake: Condvar,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the active run to stop at its next batch boundary
    pub fn cancel(&self) {
        *self.flag() = true;
        self.wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.flag()
    }

    /// Clear the request so the token can drive another run
    pub fn reset(&self) {
        *self.flag() = false;
    }

    /// Sleep between batches for at most `duration`.
    ///
    /// Returns `true` if the run should stop, either because cancellation
    /// was already requested or because it arrived during the pause.
    pub fn pause(&self, duration: Duration) -> bool {
        let (requested, _) = self
            .wake
            .wait_timeout_while(self.flag(), duration, |requested| !*requested)
            .unwrap_or_else(PoisonError::into_inner);
        *requested
    }

    // A panicking holder cannot leave the flag half-written
    fn flag(&self) -> MutexGuard<'_, bool> {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
