use tracing::trace;

use super::RateLimiter;
use crate::Millis;

/// Runs only after calls stop arriving for `wait_ms`
#[derive(Debug, Clone)]
pub struct Debounce<A> {
    wait_ms: u64,
    pending: Option<(Millis, A)>,
}

impl<A> Debounce<A> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

}

impl<A> RateLimiter<A> for Debounce<A> {
    fn call(&mut self, now: Millis, args: A) -> Option<A> {
        if self.pending.is_some() {
            trace!(now, "debounce rescheduled");
        }
        // Replacing the pending call is the cancellation
        self.pending = Some((now.saturating_add(self.wait_ms), args));
        None
    }

    fn poll(&mut self, now: Millis) -> Option<A> {
        match self.pending {
            Some((due_at, _)) if due_at <= now => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(due_at, _)| *due_at)
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_fires_once_with_last_args() {
        let mut debounce = Debounce::new(100);
        assert_eq!(debounce.call(0, "a"), None);
        assert_eq!(debounce.call(50, "b"), None);
        assert_eq!(debounce.call(90, "c"), None);

        assert_eq!(debounce.next_deadline(), Some(190));
        assert_eq!(debounce.poll(100), None);
        assert_eq!(debounce.poll(189), None);
        assert_eq!(debounce.poll(190), Some("c"));
        assert_eq!(debounce.poll(1_000), None);
        assert_eq!(debounce.next_deadline(), None);
    }

    #[test]
    fn test_separate_quiet_periods_fire_separately() {
        let mut debounce = Debounce::new(100);
        debounce.call(0, 1);
        assert_eq!(debounce.poll(100), Some(1));
        debounce.call(300, 2);
        assert_eq!(debounce.poll(399), None);
        assert_eq!(debounce.poll(400), Some(2));
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let mut debounce = Debounce::new(10);
        debounce.call(0, ());
        debounce.cancel();
        assert_eq!(debounce.poll(100), None);
        assert_eq!(debounce.next_deadline(), None);
    }
}
