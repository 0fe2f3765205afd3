use tracing::debug;

use crate::config::NavigationConfig;
use crate::host::{ElementId, Host};
use crate::limiter::{Debounce, RateLimiter};
use crate::selector::page;
use crate::{Millis, Result};

/// Toggles the mobile class on `.nav` according to viewport width
#[derive(Debug, Clone)]
pub struct MobileNav {
    nav: Option<ElementId>,
    breakpoint: f64,
    class: String,
    debounce: Debounce<()>,
}

impl MobileNav {
    pub fn attach<H: Host>(host: &H, config: &NavigationConfig) -> Self {
        Self {
            nav: host.query(&page::nav()).first().copied(),
            breakpoint: config.mobile_breakpoint_px,
            class: config.mobile_class.clone(),
            debounce: Debounce::new(config.resize_debounce_ms),
        }
    }

    pub fn on_resize(&mut self, now: Millis) {
        if self.nav.is_some() {
            self.debounce.call(now, ());
        }
    }

    /// Apply the class if the resize debounce has settled
    pub fn poll<H: Host>(&mut self, host: &mut H, now: Millis) -> Result<()> {
        match self.debounce.poll(now) {
            Some(()) => self.apply(host),
            None => Ok(()),
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.debounce.next_deadline()
    }

    pub fn apply<H: Host>(&self, host: &mut H) -> Result<()> {
        let Some(nav) = self.nav else {
            return Ok(());
        };
        let width = host.viewport().width;
        if width <= self.breakpoint {
            host.add_class(nav, &self.class)?;
        } else {
            host.remove_class(nav, &self.class)?;
        }
        debug!(width, mobile = width <= self.breakpoint, "nav layout applied");
        Ok(())
    }
}
