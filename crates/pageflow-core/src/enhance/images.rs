//! Image loading: deferred `data-src` images, loading hints on every image,
//! and preload links for critical resources.

use tracing::debug;

use crate::host::{ElementId, HeadNode, Host, PreloadKind};
use crate::selector::page;
use crate::viewport::intersects;
use crate::Result;

/// Images whose real source waits in `data-src` until they come into view
#[derive(Debug, Clone)]
pub struct LazyImages {
    pending: Vec<ElementId>,
    lazy_class: String,
}

impl LazyImages {
    pub fn attach<H: Host>(host: &H, lazy_class: &str) -> Self {
        Self {
            pending: host.query(&page::lazy_images()),
            lazy_class: lazy_class.to_string(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Load every pending image that overlaps the viewport.
    ///
    /// Loaded images are dropped from the pending set.
    pub fn check<H: Host>(&mut self, host: &mut H) -> Result<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let viewport = host.viewport();
        let mut loaded = 0;
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for &image in &self.pending {
            let visible = host
                .bounding_box(image)
                .is_some_and(|rect| intersects(&rect, &viewport));
            if !visible {
                still_pending.push(image);
                continue;
            }
            if let Some(src) = host.attribute(image, "data-src") {
                host.set_attribute(image, "src", &src)?;
            }
            host.remove_class(image, &self.lazy_class)?;
            loaded += 1;
        }

        self.pending = still_pending;
        if loaded > 0 {
            debug!(loaded, remaining = self.pending.len(), "lazy images loaded");
        }
        Ok(loaded)
    }
}

/// Ask the host to defer and decode every image asynchronously
pub fn optimize_images<H: Host>(host: &mut H) -> Result<usize> {
    let images = host.query(&page::images());
    for &image in &images {
        host.set_attribute(image, "loading", "lazy")?;
        host.set_attribute(image, "decoding", "async")?;
    }
    Ok(images.len())
}

pub fn inject_preload_hints<H: Host>(host: &mut H, resources: &[String]) -> Result<()> {
    for href in resources {
        host.append_to_head(HeadNode::Preload {
            href: href.clone(),
            kind: PreloadKind::for_resource(href),
        })?;
    }
    Ok(())
}
