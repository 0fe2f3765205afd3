//! Page coordinator: the single entry point a host talks to.
//!
//! `init` wires every listener once the document is ready. Afterwards the
//! host feeds events through `dispatch`, calls `advance` whenever the clock
//! reaches `next_wakeup`, and delivers `PageEvent::Frame` for requested
//! animation frames. Handler failures are absorbed by the error reporter and
//! never reach the host.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EnhanceConfig;
use crate::enhance::{
    a11y, images, theme, ErrorReporter, FormValidator, HoverEffects, InternalLinks, KeyboardNav,
    LazyImages, LinkAction, MobileNav,
};
use crate::event::{EventOutcome, PageEvent};
use crate::host::{ElementId, EventKind, EventTarget, Host};
use crate::nav::ActiveNav;
use crate::scheduler::TimerQueue;
use crate::scroll::{AnimationSession, SmoothScroller};
use crate::selector::page;
use crate::tracker::AnimationTracker;
use crate::{Millis, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerSlot {
    FadeIn,
    Cards,
}

/// Work deferred to a later tick
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageTask {
    Reveal { slot: TrackerSlot, element: ElementId },
    ReleaseButton(ElementId),
    ClearFieldError(ElementId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub tracked: usize,
    pub animated: usize,
}

impl From<&AnimationTracker> for TrackerSnapshot {
    fn from(tracker: &AnimationTracker) -> Self {
        Self {
            tracked: tracker.elements().len(),
            animated: tracker.animated_count(),
        }
    }
}

/// Read-only view of the coordinator's state, for inspection and tooling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatorSnapshot {
    pub active_section: Option<String>,
    pub fade_in: TrackerSnapshot,
    pub cards: TrackerSnapshot,
    pub scroll_session: Option<AnimationSession>,
    pub pending_timers: usize,
    pub lazy_images_pending: usize,
    pub errors_reported: usize,
}

pub struct PageCoordinator {
    config: EnhanceConfig,
    timers: TimerQueue<PageTask>,
    nav: ActiveNav,
    fade_in: AnimationTracker,
    cards: AnimationTracker,
    scroller: SmoothScroller,
    links: InternalLinks,
    mobile: MobileNav,
    hover: HoverEffects,
    forms: FormValidator,
    lazy: LazyImages,
    keyboard: KeyboardNav,
    reporter: ErrorReporter,
}

impl PageCoordinator {
    /// Wire every enhancement into the page. Call once, when the document
    /// is ready.
    pub fn init<H: Host>(host: &mut H, config: EnhanceConfig, now: Millis) -> Result<Self> {
        config.validate()?;

        // Error listeners go first so failures during setup are reported
        let reporter = ErrorReporter::attach(host);

        host.listen(EventTarget::Window, EventKind::Scroll);
        host.listen(EventTarget::Window, EventKind::Resize);

        let links = InternalLinks::attach(host);
        let nav = ActiveNav::attach(host, &config.scroll);
        let mobile = MobileNav::attach(host, &config.navigation);
        let fade_in = AnimationTracker::attach(
            host,
            "fade-in",
            &page::fade_in(),
            config.animations.fade_in.clone(),
        );
        let cards = AnimationTracker::attach(
            host,
            "cards",
            &page::reveal_cards(),
            config.animations.cards.clone(),
        );
        let hover = HoverEffects::attach(host, &config.interactions);
        let forms = FormValidator::attach(host, &config.interactions);
        let lazy = LazyImages::attach(host, &config.performance.lazy_class);
        let keyboard = KeyboardNav::attach(host);

        let mut coordinator = Self {
            timers: TimerQueue::new(),
            scroller: SmoothScroller::new(config.scroll.clone()),
            nav,
            fade_in,
            cards,
            links,
            mobile,
            hover,
            forms,
            lazy,
            keyboard,
            reporter,
            config,
        };
        coordinator.startup(host, now);

        info!(
            fade_in = coordinator.fade_in.elements().len(),
            cards = coordinator.cards.elements().len(),
            lazy_images = coordinator.lazy.pending(),
            "page coordinator initialized"
        );
        Ok(coordinator)
    }

    /// One-off work at load: layout checks that must not wait for a scroll
    fn startup<H: Host>(&mut self, host: &mut H, now: Millis) {
        let result = self.mobile.apply(host);
        self.absorb("nav layout", result);

        // The highlight is set once at load without opening a throttle window
        let result = self.nav.update(host);
        self.absorb("active section", result);
        self.reveal_checks(host, now);

        let result = images::optimize_images(host).map(drop);
        self.absorb("image attributes", result);
        let result = images::inject_preload_hints(host, &self.config.performance.preload_resources);
        self.absorb("resource hints", result);

        let result = a11y::inject_focus_outline(host, &self.config.accessibility.focus_outline_color);
        self.absorb("focus outline", result);
        let result = a11y::label_icon_buttons(host, &self.config.accessibility.aria_fallback_label)
            .map(drop);
        self.absorb("aria labels", result);

        let result = theme::apply_preferred_theme(host, &self.config.general.dark_theme_class)
            .map(drop);
        self.absorb("theme", result);
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    pub fn scroller(&self) -> &SmoothScroller {
        &self.scroller
    }

    pub fn active_section(&self) -> Option<&str> {
        self.nav.active()
    }

    pub fn is_animated(&self, element: ElementId) -> bool {
        self.fade_in.is_animated(element) || self.cards.is_animated(element)
    }

    pub fn snapshot(&self) -> CoordinatorSnapshot {
        CoordinatorSnapshot {
            active_section: self.nav.active().map(str::to_string),
            fade_in: TrackerSnapshot::from(&self.fade_in),
            cards: TrackerSnapshot::from(&self.cards),
            scroll_session: self.scroller.session().cloned(),
            pending_timers: self.timers.len(),
            lazy_images_pending: self.lazy.pending(),
            errors_reported: self.reporter.reported(),
        }
    }

    /// Handle one host event
    pub fn dispatch<H: Host>(&mut self, host: &mut H, event: &PageEvent, now: Millis) -> EventOutcome {
        let result = match event {
            PageEvent::Scroll => {
                self.scroll_checks(host, now);
                Ok(EventOutcome::default())
            }
            PageEvent::Resize => {
                self.mobile.on_resize(now);
                self.lazy.check(host).map(|_| EventOutcome::default())
            }
            PageEvent::Click { target } => self.on_click(host, *target, now),
            PageEvent::MouseEnter { target } => self
                .hover
                .on_enter(host, *target)
                .map(|()| EventOutcome::default()),
            PageEvent::MouseLeave { target } => self
                .hover
                .on_leave(host, *target)
                .map(|()| EventOutcome::default()),
            PageEvent::KeyDown { key } => self
                .keyboard
                .on_key(host, key)
                .map(|_| EventOutcome::default()),
            PageEvent::Submit { form } => self.on_submit(host, *form, now),
            PageEvent::Frame { timestamp } => {
                self.scroller.on_frame(host, *timestamp);
                Ok(EventOutcome::default())
            }
            PageEvent::ScriptError { message } => return self.reporter.script_error(message),
            PageEvent::UnhandledRejection { reason } => {
                return self.reporter.unhandled_rejection(reason)
            }
        };

        result.unwrap_or_else(|err| {
            let context = event
                .kind()
                .map_or_else(|| "frame".to_string(), |kind| format!("{kind:?}"));
            self.reporter.handler_failed(&context, &err);
            EventOutcome::default()
        })
    }

    /// Run deferred work that is due at `now`
    pub fn advance<H: Host>(&mut self, host: &mut H, now: Millis) {
        let result = self.mobile.poll(host, now);
        self.absorb("nav layout", result);

        while let Some(task) = self.timers.pop_due(now) {
            let result = self.run_task(host, &task);
            self.absorb("scheduled task", result);
        }
    }

    /// When `advance` next has work to do
    pub fn next_wakeup(&self) -> Option<Millis> {
        [self.timers.next_due(), self.mobile.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Stop a running smooth scroll at its current position
    pub fn cancel_scroll(&mut self) {
        self.scroller.cancel();
    }

    fn scroll_checks<H: Host>(&mut self, host: &mut H, now: Millis) {
        let result = self.nav.on_scroll(host, now);
        self.absorb("active section", result);
        self.reveal_checks(host, now);
    }

    fn reveal_checks<H: Host>(&mut self, host: &mut H, now: Millis) {
        let result = self.fade_in.on_scroll(host, now);
        self.schedule_reveals(TrackerSlot::FadeIn, result, now);
        let result = self.cards.on_scroll(host, now);
        self.schedule_reveals(TrackerSlot::Cards, result, now);

        let result = self.lazy.check(host).map(drop);
        self.absorb("lazy images", result);
    }

    fn schedule_reveals(&mut self, slot: TrackerSlot, hidden: Result<Vec<ElementId>>, now: Millis) {
        let hidden = match hidden {
            Ok(hidden) => hidden,
            Err(err) => {
                self.reporter.handler_failed("reveal", &err);
                return;
            }
        };
        let delay = self.tracker(slot).reveal_delay();
        for element in hidden {
            self.timers
                .schedule(now, delay, PageTask::Reveal { slot, element });
        }
    }

    fn on_click<H: Host>(&mut self, host: &mut H, target: ElementId, now: Millis) -> Result<EventOutcome> {
        if self.hover.on_press(host, target)? {
            self.timers.schedule(
                now,
                self.hover.press_release_ms(),
                PageTask::ReleaseButton(target),
            );
        }

        match self.links.resolve(host, target) {
            LinkAction::ScrollTop => {
                self.scroller.cancel();
                host.smooth_scroll_native(0.0);
                Ok(EventOutcome::prevent_default())
            }
            LinkAction::ScrollTo { top } => {
                self.scroller
                    .scroll_to(host, top, self.config.scroll.offset_px);
                Ok(EventOutcome::prevent_default())
            }
            LinkAction::Ignore => Ok(EventOutcome::default()),
        }
    }

    fn on_submit<H: Host>(&mut self, host: &mut H, form: ElementId, now: Millis) -> Result<EventOutcome> {
        if !self.forms.contains(form) {
            return Ok(EventOutcome::default());
        }
        let report = self.forms.validate(host, form)?;
        let clear_after = self.forms.clear_after_ms();
        for field in report.invalid {
            self.timers
                .schedule(now, clear_after, PageTask::ClearFieldError(field));
        }
        Ok(EventOutcome::prevent_default())
    }

    fn run_task<H: Host>(&mut self, host: &mut H, task: &PageTask) -> Result<()> {
        debug!(?task, "running scheduled task");
        match *task {
            PageTask::Reveal { slot, element } => self.tracker(slot).reveal(host, element),
            PageTask::ReleaseButton(button) => self.hover.release(host, button),
            PageTask::ClearFieldError(field) => self.forms.clear_error(host, field),
        }
    }

    fn tracker(&self, slot: TrackerSlot) -> &AnimationTracker {
        match slot {
            TrackerSlot::FadeIn => &self.fade_in,
            TrackerSlot::Cards => &self.cards,
        }
    }

    fn absorb(&mut self, context: &str, result: Result<()>) {
        if let Err(err) = result {
            self.reporter.handler_failed(context, &err);
        }
    }
}
