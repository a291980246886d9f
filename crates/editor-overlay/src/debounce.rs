//! Cancellable debouncing.
//!
//! A [`Debouncer`] collapses a burst of values into the last one, released once no new value
//! arrived for a full quiescence window. Time is supplied by the caller, so the debouncer never
//! spawns timers of its own: the host polls it from its event loop (see
//! [`Debouncer::deadline`]) and cancels it on teardown.

use std::time::{Duration, Instant};

/// Collapses rapid `schedule` calls into a single delayed value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiescence window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace any pending value with `value` and restart the window at `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Returns `true` if a value is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn test_burst_collapses_to_last_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.schedule("h", t0);
        debouncer.schedule("he", t0 + Duration::from_millis(50));
        debouncer.schedule("hel", t0 + Duration::from_millis(120));

        // 200ms after the first keystroke is still inside the restarted window.
        assert_eq!(debouncer.poll(t0 + WINDOW), None);
        assert_eq!(
            debouncer.deadline(),
            Some(t0 + Duration::from_millis(320))
        );
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(320)), Some("hel"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.schedule(1, t0);
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.poll(t0 + WINDOW * 2), None);
        assert_eq!(debouncer.cancel(), None);
    }
}
