//! Virtual-clock harness around a coordinator and its host.

use serde::Serialize;
use tracing::debug;

use pageflow_core::{
    CoordinatorSnapshot, ElementId, EnhanceConfig, EventOutcome, EventTarget, Host, Key, Millis,
    PageCoordinator, PageEvent, Viewport,
};

use crate::error::{Result, SimError};
use crate::host::SimHost;

/// Spacing between simulated animation frames
pub const FRAME_INTERVAL_MS: Millis = 16;

/// Upper bound on wakeups processed by [`SimPage::run_until_idle`]
const IDLE_STEP_LIMIT: usize = 10_000;

/// An event that reached the coordinator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatched {
    pub at: Millis,
    pub event: PageEvent,
    pub default_prevented: bool,
}

pub struct SimPage {
    host: SimHost,
    coordinator: PageCoordinator,
    now: Millis,
    next_frame: Option<Millis>,
    dispatched: Vec<Dispatched>,
}

impl SimPage {
    /// Load the page and initialize the coordinator at time zero
    pub fn load(mut host: SimHost, config: EnhanceConfig) -> Result<Self> {
        host.set_clock(0);
        let coordinator = PageCoordinator::init(&mut host, config, 0)?;
        let mut page = Self {
            host,
            coordinator,
            now: 0,
            next_frame: None,
            dispatched: Vec::new(),
        };
        page.settle();
        Ok(page)
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    pub fn coordinator(&self) -> &PageCoordinator {
        &self.coordinator
    }

    pub fn snapshot(&self) -> CoordinatorSnapshot {
        self.coordinator.snapshot()
    }

    pub fn dispatched(&self) -> &[Dispatched] {
        &self.dispatched
    }

    pub fn element(&self, key: &str) -> Result<ElementId> {
        self.host
            .document()
            .by_key(key)
            .ok_or_else(|| SimError::UnknownKey(key.to_string()))
    }

    /// Earliest instant anything is scheduled: a frame or a coordinator wakeup
    pub fn next_event_time(&self) -> Option<Millis> {
        [self.next_frame, self.coordinator.next_wakeup()]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn advance_by(&mut self, delta_ms: Millis) -> Result<()> {
        self.advance_to(self.now.saturating_add(delta_ms))
    }

    /// Move the clock to `target`, delivering frames and running timers in
    /// time order along the way.
    pub fn advance_to(&mut self, target: Millis) -> Result<()> {
        if target < self.now {
            return Err(SimError::ClockWentBack {
                now: self.now,
                target,
            });
        }

        while let Some(at) = self.next_event_time().filter(|&at| at <= target) {
            self.set_now(at.max(self.now));
            if self.next_frame.is_some_and(|frame| frame <= self.now) {
                self.next_frame = None;
                self.deliver(PageEvent::Frame {
                    timestamp: self.now,
                });
            }
            self.coordinator.advance(&mut self.host, self.now);
            self.settle();
        }

        self.set_now(target);
        self.coordinator.advance(&mut self.host, self.now);
        self.settle();
        Ok(())
    }

    /// Advance until nothing is scheduled. Returns the time the page settled.
    pub fn run_until_idle(&mut self) -> Result<Millis> {
        for _ in 0..IDLE_STEP_LIMIT {
            match self.next_event_time() {
                Some(at) => self.advance_to(at.max(self.now))?,
                None => return Ok(self.now),
            }
        }
        Err(SimError::StepLimit(IDLE_STEP_LIMIT))
    }

    /// User scroll to an absolute offset
    pub fn scroll_to(&mut self, offset: f64) -> EventOutcome {
        let before = self.host.scroll_offset();
        self.host.user_scroll(offset);
        if self.host.scroll_offset() == before {
            return EventOutcome::default();
        }
        self.window_event(PageEvent::Scroll)
    }

    pub fn resize(&mut self, width: f64, height: f64) -> EventOutcome {
        self.host.set_viewport(Viewport::new(width, height));
        self.window_event(PageEvent::Resize)
    }

    pub fn click(&mut self, element: ElementId) -> EventOutcome {
        self.element_event(element, |target| PageEvent::Click { target })
    }

    pub fn hover(&mut self, element: ElementId) -> EventOutcome {
        self.element_event(element, |target| PageEvent::MouseEnter { target })
    }

    pub fn leave(&mut self, element: ElementId) -> EventOutcome {
        self.element_event(element, |target| PageEvent::MouseLeave { target })
    }

    pub fn submit(&mut self, form: ElementId) -> EventOutcome {
        self.element_event(form, |form| PageEvent::Submit { form })
    }

    pub fn key(&mut self, key: &str) -> EventOutcome {
        let event = PageEvent::KeyDown {
            key: Key::from_dom(key),
        };
        self.targeted(EventTarget::Document, event)
    }

    pub fn set_value(&mut self, element: ElementId, value: &str) -> Result<()> {
        self.host.set_value(element, value)?;
        Ok(())
    }

    pub fn raise_error(&mut self, message: &str) -> EventOutcome {
        self.window_event(PageEvent::ScriptError {
            message: message.to_string(),
        })
    }

    pub fn reject(&mut self, reason: &str) -> EventOutcome {
        self.window_event(PageEvent::UnhandledRejection {
            reason: reason.to_string(),
        })
    }

    fn window_event(&mut self, event: PageEvent) -> EventOutcome {
        self.targeted(EventTarget::Window, event)
    }

    /// Deliver to the nearest listening element, bubbling up the ancestry
    fn element_event(&mut self, element: ElementId, event: impl FnOnce(ElementId) -> PageEvent) -> EventOutcome {
        let probe = event(element);
        let Some(kind) = probe.kind() else {
            return EventOutcome::default();
        };
        match self.host.listener_for(element, kind) {
            Some(listener) if listener == element => self.deliver(probe),
            Some(listener) => self.deliver(retarget(probe, listener)),
            None => EventOutcome::default(),
        }
    }

    fn targeted(&mut self, target: EventTarget, event: PageEvent) -> EventOutcome {
        let listening = event
            .kind()
            .is_some_and(|kind| self.host.is_listening(target, kind));
        if listening {
            self.deliver(event)
        } else {
            EventOutcome::default()
        }
    }

    /// Hand an event to the coordinator. Any scroll the handler caused is
    /// reported back as a scroll event, like a browser would.
    fn deliver(&mut self, event: PageEvent) -> EventOutcome {
        let before = self.host.scroll_offset();
        let outcome = self.coordinator.dispatch(&mut self.host, &event, self.now);
        self.dispatched.push(Dispatched {
            at: self.now,
            event,
            default_prevented: outcome.default_prevented,
        });

        if self.host.scroll_offset() != before {
            self.window_event(PageEvent::Scroll);
        }
        self.settle();
        outcome
    }

    fn settle(&mut self) {
        if self.host.take_frame_request() && self.next_frame.is_none() {
            self.next_frame = Some(self.now + FRAME_INTERVAL_MS);
        }
    }

    fn set_now(&mut self, now: Millis) {
        if now != self.now {
            debug!(from = self.now, to = now, "clock advanced");
        }
        self.now = now;
        self.host.set_clock(now);
    }
}

fn retarget(event: PageEvent, target: ElementId) -> PageEvent {
    match event {
        PageEvent::Click { .. } => PageEvent::Click { target },
        PageEvent::MouseEnter { .. } => PageEvent::MouseEnter { target },
        PageEvent::MouseLeave { .. } => PageEvent::MouseLeave { target },
        PageEvent::Submit { .. } => PageEvent::Submit { form: target },
        other => other,
    }
}
