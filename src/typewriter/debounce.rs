use std::time::{Duration, Instant};

/// A trailing-edge debounce over a single pending value.
///
/// Each call records the latest argument and restarts the delay window; the
/// value is delivered by `poll` once the window elapses with no further
/// calls. Only the last call of a burst is ever delivered, exactly once.
#[derive(Debug)]
pub struct Debounced<T> {
    /// The delay window applied to new calls.
    delay: Duration,
    /// Deadline and argument of the pending delivery. At most one exists;
    /// a new call replaces it, never queues behind it.
    pending: Option<(Instant, T)>,
}

impl<T> Debounced<T> {
    /// Create a debouncer with the given delay window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a call with the latest argument, restarting the window.
    pub fn call(&mut self, arg: T) {
        self.call_at(arg, Instant::now());
    }

    /// Record a call at an explicit point in time.
    pub fn call_at(&mut self, arg: T, now: Instant) {
        self.pending = Some((now + self.delay, arg));
    }

    /// Deliver the pending argument if the window has elapsed.
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    /// Deliver the pending argument if `now` is past its deadline.
    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, arg)| arg),
            _ => None,
        }
    }

    /// Change the delay window. Takes effect for the next call; a pending
    /// delivery keeps the deadline it was scheduled with.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Drop any pending delivery without invoking it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a delivery is waiting for its window to elapse.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
