//! One-shot reveal animations for elements scrolled into view.
//!
//! Each tracked element carries an `animated` flag that only ever goes from
//! false to true. When an unanimated element is found fully inside the
//! viewport the tracker flips the flag and puts the element in its hidden
//! state; the caller schedules [`AnimationTracker::reveal`] after
//! [`AnimationTracker::reveal_delay`] to play the transition to the visible
//! state. Flagged elements are never touched again.

use serde::Serialize;
use tracing::debug;

use crate::config::RevealConfig;
use crate::host::{ElementId, Host, StyleProp};
use crate::limiter::{RateLimiter, Throttle};
use crate::selector::Selector;
use crate::viewport::is_in_viewport;
use crate::{Millis, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackedElement {
    pub id: ElementId,
    pub animated: bool,
}

#[derive(Debug, Clone)]
pub struct AnimationTracker {
    name: &'static str,
    elements: Vec<TrackedElement>,
    reveal: RevealConfig,
    throttle: Throttle,
}

impl AnimationTracker {
    /// Track every element matching `selector`.
    ///
    /// Elements whose markup already carries the marker class count as
    /// animated from the start.
    pub fn attach<H: Host>(
        host: &H,
        name: &'static str,
        selector: &Selector,
        reveal: RevealConfig,
    ) -> Self {
        let elements = host
            .query(selector)
            .into_iter()
            .map(|id| TrackedElement {
                id,
                animated: host.has_class(id, &reveal.marker_class),
            })
            .collect::<Vec<_>>();
        debug!(tracker = name, selector = %selector, count = elements.len(), "tracking elements");

        Self {
            name,
            elements,
            throttle: Throttle::new(reveal.throttle_ms),
            reveal,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn elements(&self) -> &[TrackedElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn animated_count(&self) -> usize {
        self.elements.iter().filter(|e| e.animated).count()
    }

    pub fn is_animated(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id == id && e.animated)
    }

    /// Delay between hiding an element and revealing it
    pub fn reveal_delay(&self) -> u64 {
        self.reveal.delay_ms
    }

    /// Throttled entry point for scroll events.
    ///
    /// Returns the elements that were just hidden and await their reveal.
    pub fn on_scroll<H: Host>(&mut self, host: &mut H, now: Millis) -> Result<Vec<ElementId>> {
        match self.throttle.call(now, ()) {
            Some(()) => self.tick(host),
            None => Ok(Vec::new()),
        }
    }

    /// Check every unanimated element against the viewport
    pub fn tick<H: Host>(&mut self, host: &mut H) -> Result<Vec<ElementId>> {
        let viewport = host.viewport();
        let mut triggered = Vec::new();

        for element in self.elements.iter_mut().filter(|e| !e.animated) {
            let visible = host
                .bounding_box(element.id)
                .is_some_and(|rect| is_in_viewport(&rect, &viewport));
            if !visible {
                continue;
            }

            element.animated = true;
            host.add_class(element.id, &self.reveal.marker_class)?;
            host.set_style(element.id, StyleProp::Opacity, "0")?;
            host.set_style(
                element.id,
                StyleProp::Transform,
                &format!("translateY({}px)", self.reveal.offset_px),
            )?;
            triggered.push(element.id);
        }

        if !triggered.is_empty() {
            debug!(tracker = self.name, count = triggered.len(), "elements entered viewport");
        }
        Ok(triggered)
    }

    /// Play the transition to the visible state
    pub fn reveal<H: Host>(&self, host: &mut H, element: ElementId) -> Result<()> {
        let secs = self.reveal.transition_ms as f64 / 1000.0;
        host.set_style(
            element,
            StyleProp::Transition,
            &format!("opacity {secs}s ease, transform {secs}s ease"),
        )?;
        host.set_style(element, StyleProp::Opacity, "1")?;
        host.set_style(element, StyleProp::Transform, "translateY(0)")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::page;
    use crate::testing::FakeHost;

    fn fade_tracker(host: &FakeHost) -> AnimationTracker {
        AnimationTracker::attach(host, "fade-in", &page::fade_in(), RevealConfig::fade_in())
    }

    #[test]
    fn test_visible_element_is_hidden_then_revealed() {
        let mut host = FakeHost::new();
        let el = host.add("div").class("fade-in").layout(100.0, 0.0, 200.0, 400.0).id();
        let mut tracker = fade_tracker(&host);

        assert_eq!(tracker.tick(&mut host).unwrap(), vec![el]);
        assert!(tracker.is_animated(el));
        assert!(host.has_class(el, "animated"));
        assert_eq!(host.style(el, StyleProp::Opacity), Some("0"));
        assert_eq!(host.style(el, StyleProp::Transform), Some("translateY(20px)"));
        assert_eq!(tracker.reveal_delay(), 100);

        tracker.reveal(&mut host, el).unwrap();
        assert_eq!(
            host.style(el, StyleProp::Transition),
            Some("opacity 0.6s ease, transform 0.6s ease")
        );
        assert_eq!(host.style(el, StyleProp::Opacity), Some("1"));
        assert_eq!(host.style(el, StyleProp::Transform), Some("translateY(0)"));
    }

    #[test]
    fn test_second_tick_is_idempotent() {
        let mut host = FakeHost::new();
        host.add("div").class("fade-in").layout(100.0, 0.0, 200.0, 400.0);
        let mut tracker = fade_tracker(&host);

        tracker.tick(&mut host).unwrap();
        let writes = host.style_writes.len();

        assert!(tracker.tick(&mut host).unwrap().is_empty());
        assert_eq!(host.style_writes.len(), writes);
        assert_eq!(tracker.animated_count(), 1);
    }

    #[test]
    fn test_partially_visible_element_waits() {
        let mut host = FakeHost::new();
        let el = host.add("div").class("fade-in").layout(700.0, 0.0, 200.0, 400.0).id();
        let mut tracker = fade_tracker(&host);

        assert!(tracker.tick(&mut host).unwrap().is_empty());
        assert!(!tracker.is_animated(el));

        host.scroll_y = 150.0;
        assert_eq!(tracker.tick(&mut host).unwrap(), vec![el]);
    }

    #[test]
    fn test_leaving_and_reentering_does_not_restart() {
        let mut host = FakeHost::new();
        let el = host.add("div").class("fade-in").layout(100.0, 0.0, 200.0, 400.0).id();
        let mut tracker = fade_tracker(&host);
        tracker.tick(&mut host).unwrap();

        host.scroll_y = 2_000.0;
        tracker.tick(&mut host).unwrap();
        host.scroll_y = 0.0;
        assert!(tracker.tick(&mut host).unwrap().is_empty());
        assert!(tracker.is_animated(el));
    }

    #[test]
    fn test_marker_in_markup_counts_as_animated() {
        let mut host = FakeHost::new();
        host.add("div")
            .class("fade-in")
            .class("animated")
            .layout(0.0, 0.0, 10.0, 10.0);
        let mut tracker = fade_tracker(&host);
        assert!(tracker.tick(&mut host).unwrap().is_empty());
    }

    #[test]
    fn test_scroll_checks_are_throttled() {
        let mut host = FakeHost::new();
        let el = host.add("div").class("fade-in").layout(900.0, 0.0, 100.0, 400.0).id();
        let mut tracker = fade_tracker(&host);

        assert!(tracker.on_scroll(&mut host, 0).unwrap().is_empty());
        host.scroll_y = 300.0;
        // Still inside the 100ms window: dropped, not deferred
        assert!(tracker.on_scroll(&mut host, 50).unwrap().is_empty());
        assert_eq!(tracker.on_scroll(&mut host, 100).unwrap(), vec![el]);
    }

    #[test]
    fn test_card_profile_timing() {
        let mut host = FakeHost::new();
        let card = host.add("div").class("privacy-section").layout(0.0, 0.0, 100.0, 100.0).id();
        let mut tracker =
            AnimationTracker::attach(&host, "cards", &page::reveal_cards(), RevealConfig::cards());

        assert_eq!(tracker.tick(&mut host).unwrap(), vec![card]);
        assert_eq!(host.style(card, StyleProp::Transform), Some("translateY(30px)"));
        assert!(host.has_class(card, "scroll-animated"));
        assert_eq!(tracker.reveal_delay(), 200);
        tracker.reveal(&mut host, card).unwrap();
        assert_eq!(
            host.style(card, StyleProp::Transition),
            Some("opacity 0.8s ease, transform 0.8s ease")
        );
    }
}
