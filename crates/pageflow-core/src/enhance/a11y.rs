use tracing::debug;

use crate::event::Key;
use crate::host::{ElementId, EventKind, EventTarget, HeadNode, Host};
use crate::selector::page;
use crate::Result;

/// Arrow-key focus movement through links, buttons and form controls
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardNav;

impl KeyboardNav {
    pub fn attach<H: Host>(host: &mut H) -> Self {
        host.listen(EventTarget::Document, EventKind::KeyDown);
        Self
    }

    /// Move focus one step in document order. Returns the newly focused
    /// element; focus never wraps around.
    pub fn on_key<H: Host>(&self, host: &mut H, key: &Key) -> Result<Option<ElementId>> {
        let forward = match key {
            Key::ArrowDown => true,
            Key::ArrowUp => false,
            Key::Other(_) => return Ok(None),
        };

        let focusable = host.query(&page::focusable());
        let current = host
            .active_element()
            .and_then(|active| focusable.iter().position(|&e| e == active));

        let next = match (current, forward) {
            (None, true) => focusable.first().copied(),
            (Some(i), true) => focusable.get(i + 1).copied(),
            (Some(i), false) if i > 0 => focusable.get(i - 1).copied(),
            _ => None,
        };

        if let Some(element) = next {
            host.focus(element)?;
        }
        Ok(next)
    }
}

pub fn inject_focus_outline<H: Host>(host: &mut H, color: &str) -> Result<()> {
    let css = format!(
        "*:focus {{\n    outline: 2px solid {color} !important;\n    outline-offset: 2px !important;\n}}"
    );
    host.append_to_head(HeadNode::Style { css })
}

/// Give text-less buttons an accessible name
pub fn label_icon_buttons<H: Host>(host: &mut H, label: &str) -> Result<usize> {
    let mut labelled = 0;
    for button in host.query(&page::buttons()) {
        let unlabelled = host
            .attribute(button, "aria-label")
            .map_or(true, |label| label.is_empty());
        if unlabelled
            && host.text_content(button).trim().is_empty()
        {
            host.set_attribute(button, "aria-label", label)?;
            labelled += 1;
        }
    }
    if labelled > 0 {
        debug!(labelled, "aria labels added");
    }
    Ok(labelled)
}
