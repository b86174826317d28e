//! Debounced values
//!
//! A [`Debouncer`] holds the most recent value scheduled within a quiet
//! period. Time is passed in by the caller so an event loop, a timer wheel or
//! a test can drive it.

use std::time::{Duration, Instant};

/// Coalesces rapid updates; the last value wins
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing anything pending and restarting the timer
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Whether a value is waiting
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending value, if any
    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Take the pending value if its quiet period has elapsed
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, at)) if now >= *at);
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending value regardless of time
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(1, start);
        debouncer.schedule(2, start + Duration::from_millis(100));
        debouncer.schedule(3, start + Duration::from_millis(200));

        // timer restarted by the last schedule
        assert_eq!(debouncer.take_due(start + Duration::from_millis(600)), None);
        assert_eq!(debouncer.take_due(start + Duration::from_millis(700)), Some(3));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_flush_ignores_time() {
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.schedule("draft", Instant::now());
        assert_eq!(debouncer.peek(), Some(&"draft"));
        assert_eq!(debouncer.flush(), Some("draft"));
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_nothing_pending() {
        let mut debouncer: Debouncer<u8> = Debouncer::new(Duration::ZERO);
        assert_eq!(debouncer.take_due(Instant::now()), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
