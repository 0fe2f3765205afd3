use tracing::trace;

use super::RateLimiter;
use crate::Millis;

/// Runs the first call, then drops calls until `limit_ms` has passed.
///
/// Dropped calls are not replayed when the window closes.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: u64,
    cooldown_until: Option<Millis>,
}

impl Throttle {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            cooldown_until: None,
        }
    }

    pub fn in_cooldown(&self, now: Millis) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }
}

impl<A> RateLimiter<A> for Throttle {
    fn call(&mut self, now: Millis, args: A) -> Option<A> {
        if self.in_cooldown(now) {
            trace!(now, "throttled call dropped");
            return None;
        }
        self.cooldown_until = Some(now.saturating_add(self.limit_ms));
        Some(args)
    }

    fn poll(&mut self, now: Millis) -> Option<A> {
        if !self.in_cooldown(now) {
            self.cooldown_until = None;
        }
        None
    }

    fn next_deadline(&self) -> Option<Millis> {
        // Leaving the cooldown needs no work, so there is nothing to wake for
        None
    }

    fn cancel(&mut self) {
        self.cooldown_until = None;
    }
}
