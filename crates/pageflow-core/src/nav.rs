//! Active navigation highlighting.
//!
//! The section containing the scroll offset (shifted down by the sticky header
//! height) is the active one. Ranges are half-open, so an offset sitting on a
//! section's top edge belongs to that section. If sections overlap, the last
//! one in document order wins; if the offset falls in a gap, nothing changes.

use serde::Serialize;
use tracing::debug;

use crate::config::ScrollConfig;
use crate::host::{ElementId, Host};
use crate::limiter::{RateLimiter, Throttle};
use crate::selector::{page, Selector};
use crate::{Millis, Result};

/// A navigable section in document coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.top && offset < self.top + self.height
    }
}

/// Find the section containing `adjusted_offset`; last match wins
pub fn resolve_active(sections: &[Section], adjusted_offset: f64) -> Option<&Section> {
    sections
        .iter()
        .rev()
        .find(|section| section.contains(adjusted_offset))
}

#[derive(Debug, Clone)]
pub struct ActiveNav {
    links: Vec<ElementId>,
    sections: Vec<ElementId>,
    active: Option<String>,
    bias: f64,
    active_class: String,
    throttle: Throttle,
}

impl ActiveNav {
    pub fn attach<H: Host>(host: &H, config: &ScrollConfig) -> Self {
        let links = host.query(&page::nav_links());
        let sections = host.query(&page::sections());
        debug!(links = links.len(), sections = sections.len(), "tracking nav sections");

        Self {
            links,
            sections,
            active: None,
            bias: config.offset_px,
            active_class: config.nav_active_class.clone(),
            throttle: Throttle::new(config.nav_throttle_ms),
        }
    }

    /// Id of the section whose link is highlighted
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Throttled entry point for scroll events
    pub fn on_scroll<H: Host>(&mut self, host: &mut H, now: Millis) -> Result<()> {
        match self.throttle.call(now, ()) {
            Some(()) => self.update(host),
            None => Ok(()),
        }
    }

    /// Read section layout from the host in document order
    pub fn sections<H: Host>(&self, host: &H) -> Vec<Section> {
        self.sections
            .iter()
            .filter_map(|&id| {
                Some(Section {
                    id: host.attribute(id, "id")?,
                    top: host.offset_top(id)?,
                    height: host.offset_height(id)?,
                })
            })
            .collect()
    }

    pub fn update<H: Host>(&mut self, host: &mut H) -> Result<()> {
        if self.links.is_empty() || self.sections.is_empty() {
            return Ok(());
        }

        let adjusted = host.scroll_offset() + self.bias;
        let sections = self.sections(host);
        let Some(section) = resolve_active(&sections, adjusted) else {
            return Ok(());
        };
        if self.active.as_deref() == Some(section.id.as_str()) {
            return Ok(());
        }

        for &link in &self.links {
            host.remove_class(link, &self.active_class)?;
        }
        let href = format!("#{}", section.id);
        let target = Selector::attr_eq("href", href).within(page::nav());
        for link in host.query(&target) {
            host.add_class(link, &self.active_class)?;
        }

        debug!(section = %section.id, adjusted, "active section changed");
        self.active = Some(section.id.clone());
        Ok(())
    }
}
