//! Capability interface between the coordinator and the page it runs in.
//!
//! A real browser host forwards these calls to the DOM; `pageflow-sim`
//! implements them over an in-memory document.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selector::Selector;
use crate::viewport::{Rect, Viewport};
use crate::Result;

/// Opaque handle to an element owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Scroll,
    Resize,
    Click,
    MouseEnter,
    MouseLeave,
    KeyDown,
    Submit,
    Error,
    UnhandledRejection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTarget {
    Window,
    Document,
    Element(ElementId),
}

/// Inline style properties the coordinator writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProp {
    Opacity,
    Transform,
    Transition,
    BoxShadow,
    BorderColor,
}

impl StyleProp {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Transform => "transform",
            Self::Transition => "transition",
            Self::BoxShadow => "box-shadow",
            Self::BorderColor => "border-color",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreloadKind {
    Style,
    Script,
}

impl PreloadKind {
    /// `.css` resources preload as styles, everything else as scripts
    pub fn for_resource(href: &str) -> Self {
        if href.ends_with(".css") {
            Self::Style
        } else {
            Self::Script
        }
    }
}

/// Node appended to the document head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum HeadNode {
    Preload { href: String, kind: PreloadKind },
    Style { css: String },
}

pub trait Host {
    /// All elements matching the selector, in document order
    fn query(&self, selector: &Selector) -> Vec<ElementId>;

    /// Descendants of `root` matching the selector, in document order
    fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId>;

    fn listen(&mut self, target: EventTarget, kind: EventKind);

    /// Viewport-relative bounding box
    fn bounding_box(&self, element: ElementId) -> Option<Rect>;

    /// Document-relative top edge
    fn offset_top(&self, element: ElementId) -> Option<f64>;

    fn offset_height(&self, element: ElementId) -> Option<f64>;

    fn viewport(&self) -> Viewport;

    /// Current vertical scroll position
    fn scroll_offset(&self) -> f64;

    fn set_scroll(&mut self, offset: f64);

    /// Hand a scroll to the host's own smooth scrolling
    fn smooth_scroll_native(&mut self, offset: f64);

    /// Ask for a `PageEvent::Frame` on the next animation frame
    fn request_frame(&mut self);

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> Result<()>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()>;

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<()>;

    fn set_style(&mut self, element: ElementId, prop: StyleProp, value: &str) -> Result<()>;

    fn text_content(&self, element: ElementId) -> String;

    /// Current value of a form field
    fn value(&self, element: ElementId) -> Option<String>;

    fn focus(&mut self, element: ElementId) -> Result<()>;

    fn active_element(&self) -> Option<ElementId>;

    fn append_to_head(&mut self, node: HeadNode) -> Result<()>;

    fn body(&self) -> Option<ElementId>;

    fn prefers_dark_scheme(&self) -> bool;
}
