use std::time::{Duration, Instant};

/// Trailing-edge debounce timer.
///
/// Every [`schedule`](Self::schedule) cancels the pending deadline and starts a
/// new one, so a burst of calls fires once, `delay` after the last call. The
/// timer never fires on its own: the owner polls it with
/// [`take_due`](Self::take_due) from its event loop.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once per burst, the first time it is polled at or
    /// after the deadline.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
