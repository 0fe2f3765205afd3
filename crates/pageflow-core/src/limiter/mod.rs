//! Call-rate limiting for high-frequency events.
//!
//! Limiters are clock-driven state machines: `call` offers an invocation at a
//! given time and `poll` releases deferred work once its deadline passes.

pub mod debounce;
pub mod throttle;

pub use debounce::Debounce;
pub use throttle::Throttle;

use crate::Millis;

pub trait RateLimiter<A> {
    /// Offer a call at `now`. Returns the arguments when the guarded
    /// function should run immediately.
    fn call(&mut self, now: Millis, args: A) -> Option<A>;

    /// Advance to `now`. Returns the arguments of a deferred call that
    /// became due.
    fn poll(&mut self, now: Millis) -> Option<A>;

    /// When `poll` next has something to do
    fn next_deadline(&self) -> Option<Millis>;

    /// Forget pending work and cooldowns
    fn cancel(&mut self);
}
