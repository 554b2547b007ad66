//! Trailing-edge debouncing for server-mode filter changes.
//!
//! The debouncer holds no timer of its own. Callers schedule with the current
//! instant and poll with [`Debouncer::fire_if_due`], typically from a tick
//! event, which keeps the state machine free of clocks and easy to test.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Longest accepted quiet period. Longer windows are clamped to it.
pub const MAX_DEBOUNCE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.min(MAX_DEBOUNCE),
            deadline: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Restarts the quiet period from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now.checked_add(self.window).unwrap_or(now));
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` once, when a scheduled quiet period has elapsed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_the_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.schedule(start);

        assert!(!debouncer.fire_if_due(start + Duration::from_millis(299)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(300)));
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(900)));
    }

    #[test]
    fn rescheduling_extends_the_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(80));

        assert!(!debouncer.fire_if_due(start + Duration::from_millis(120)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(180)));
    }

    #[test]
    fn oversized_windows_are_clamped() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(u64::MAX));
        assert_eq!(debouncer.window(), MAX_DEBOUNCE);

        debouncer.schedule(start);
        assert!(!debouncer.fire_if_due(start + Duration::from_secs(59)));
        assert!(debouncer.fire_if_due(start + MAX_DEBOUNCE));
    }
}
