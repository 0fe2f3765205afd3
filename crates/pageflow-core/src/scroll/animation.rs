//! Frame-driven smooth scroll controller.
//!
//! Combines easing and timing to move the page toward a target offset, one
//! host animation frame at a time. Only one session is live at a time: a new
//! `scroll_to` replaces the running session instead of racing it.

use serde::Serialize;
use tracing::debug;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{elapsed, is_complete, lerp, progress};
use crate::config::ScrollConfig;
use crate::host::Host;
use crate::Millis;

/// One smooth-scroll invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationSession {
    /// Timestamp of the first frame; unset until that frame arrives
    pub start: Option<Millis>,
    /// Scroll offset when the session began
    pub from: f64,
    /// Final scroll offset
    pub to: f64,
    pub duration: Millis,
    easing: EasingType,
}

impl AnimationSession {
    pub fn new(from: f64, to: f64, duration: Millis, easing: EasingType) -> Self {
        Self {
            start: None,
            from,
            to,
            duration,
            easing,
        }
    }

    /// Signed distance covered by the session
    pub fn distance(&self) -> f64 {
        self.to - self.from
    }

    /// Scroll offset `elapsed_ms` into the session
    pub fn sample(&self, elapsed_ms: Millis) -> f64 {
        if is_complete(elapsed_ms, self.duration) {
            return self.to;
        }
        let t = progress(elapsed_ms, self.duration);
        lerp(self.from, self.to, self.easing.apply(t))
    }
}

/// Smooth scroll animator
///
/// Call `scroll_to()` to begin a session, then `on_frame()` for every frame
/// the host delivers.
#[derive(Debug, Clone)]
pub struct SmoothScroller {
    session: Option<AnimationSession>,
    config: ScrollConfig,
}

impl SmoothScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            session: None,
            config,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if a session is currently running
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    /// Start scrolling so that `target_top` ends up `bias` pixels below the
    /// top of the viewport.
    ///
    /// Any running session is dropped first. With smooth scrolling disabled
    /// the page jumps straight to the target.
    pub fn scroll_to<H: Host>(&mut self, host: &mut H, target_top: f64, bias: f64) {
        let to = target_top - bias;
        let from = host.scroll_offset();

        if self.session.take().is_some() {
            debug!(from, to, "smooth scroll preempted");
        }

        if !self.is_smooth() {
            host.set_scroll(to);
            return;
        }

        debug!(from, to, distance = to - from, "smooth scroll started");
        self.session = Some(AnimationSession::new(
            from,
            to,
            self.config.animation_duration_ms,
            self.config.easing,
        ));
        host.request_frame();
    }

    /// Advance the running session to the frame at `timestamp`.
    ///
    /// Returns true while the session needs more frames.
    pub fn on_frame<H: Host>(&mut self, host: &mut H, timestamp: Millis) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let start = *session.start.get_or_insert(timestamp);
        let elapsed_ms = elapsed(start, timestamp);
        host.set_scroll(session.sample(elapsed_ms));

        if is_complete(elapsed_ms, session.duration) {
            debug!(to = session.to, "smooth scroll finished");
            self.session = None;
            false
        } else {
            host.request_frame();
            true
        }
    }

    /// Stop at the current position
    pub fn cancel(&mut self) {
        self.session = None;
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }
}
