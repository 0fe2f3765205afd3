//! Frame timing arithmetic on host-supplied millisecond timestamps.

use crate::Millis;

/// Time since `start`; a clock reading earlier than `start` counts as zero
#[inline]
pub fn elapsed(start: Millis, now: Millis) -> Millis {
    now.saturating_sub(start)
}

/// Fraction of `duration` covered by `elapsed`, in [0, 1].
///
/// A zero duration is complete from the start.
#[inline]
pub fn progress(elapsed: Millis, duration: Millis) -> f64 {
    match duration {
        0 => 1.0,
        total => (elapsed.min(total) as f64) / (total as f64),
    }
}

#[inline]
pub fn is_complete(elapsed: Millis, duration: Millis) -> bool {
    elapsed >= duration
}

/// Position `t` of the way from `from` to `to`
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
