use std::collections::BTreeSet;

use serde::Serialize;
use tracing::trace;

use pageflow_core::{
    ElementId, Error, EventKind, EventTarget, HeadNode, Host, Millis, Rect, Selector, StyleProp,
    Viewport,
};

use crate::dom::{SimDocument, SimElement};

/// A single observable change the coordinator made to the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    ClassAdded { element: ElementId, class: String },
    ClassRemoved { element: ElementId, class: String },
    Style { element: ElementId, prop: StyleProp, value: String },
    Attribute { element: ElementId, name: String, value: String },
    Scroll { offset: f64, smooth: bool },
    Focus { element: ElementId },
    Head { node: HeadNode },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation {
    pub at: Millis,
    #[serde(flatten)]
    pub change: Change,
}

/// In-memory host over a [`SimDocument`]
#[derive(Debug, Clone)]
pub struct SimHost {
    doc: SimDocument,
    listeners: BTreeSet<(EventTarget, EventKind)>,
    viewport: Viewport,
    scroll_y: f64,
    prefers_dark: bool,
    head: Vec<HeadNode>,
    frame_requested: bool,
    focused: Option<ElementId>,
    mutations: Vec<Mutation>,
    now: Millis,
}

impl SimHost {
    pub fn new(doc: SimDocument, viewport: Viewport) -> Self {
        Self {
            doc,
            listeners: BTreeSet::new(),
            viewport,
            scroll_y: 0.0,
            prefers_dark: false,
            head: Vec::new(),
            frame_requested: false,
            focused: None,
            mutations: Vec::new(),
            now: 0,
        }
    }

    pub fn with_dark_preference(mut self, prefers_dark: bool) -> Self {
        self.prefers_dark = prefers_dark;
        self
    }

    pub fn document(&self) -> &SimDocument {
        &self.doc
    }

    pub fn head(&self) -> &[HeadNode] {
        &self.head
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn is_listening(&self, target: EventTarget, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    /// Nearest element in `element`'s ancestry listening for `kind`
    pub fn listener_for(&self, element: ElementId, kind: EventKind) -> Option<ElementId> {
        self.doc
            .ancestry(element)
            .into_iter()
            .find(|&e| self.is_listening(EventTarget::Element(e), kind))
    }

    pub fn style(&self, element: ElementId, prop: StyleProp) -> Option<&str> {
        self.doc.get(element)?.styles.get(&prop).map(String::as_str)
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.doc.content_height() - self.viewport.height).max(0.0)
    }

    pub(crate) fn set_clock(&mut self, now: Millis) {
        self.now = now;
    }

    pub(crate) fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// User scroll; no mutation is recorded
    pub(crate) fn user_scroll(&mut self, offset: f64) {
        self.scroll_y = self.clamp_scroll(offset);
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_y = self.clamp_scroll(self.scroll_y);
    }

    pub(crate) fn set_value(&mut self, element: ElementId, value: &str) -> pageflow_core::Result<()> {
        self.element_mut(element)?.value = Some(value.to_string());
        Ok(())
    }

    fn clamp_scroll(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }

    fn record(&mut self, change: Change) {
        trace!(at = self.now, ?change, "mutation");
        self.mutations.push(Mutation {
            at: self.now,
            change,
        });
    }

    fn element(&self, id: ElementId) -> pageflow_core::Result<&SimElement> {
        self.doc.get(id).ok_or(Error::UnknownElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> pageflow_core::Result<&mut SimElement> {
        self.doc.get_mut(id).ok_or(Error::UnknownElement(id))
    }
}

impl Host for SimHost {
    fn query(&self, selector: &Selector) -> Vec<ElementId> {
        self.doc.query(selector)
    }

    fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.doc
            .query(selector)
            .into_iter()
            .filter(|&id| self.doc.is_descendant(id, root))
            .collect()
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) {
        self.listeners.insert((target, kind));
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        let layout = self.doc.get(element)?.layout?;
        let top = layout.top - self.scroll_y;
        Some(Rect::new(
            top,
            layout.left,
            top + layout.height,
            layout.left + layout.width,
        ))
    }

    fn offset_top(&self, element: ElementId) -> Option<f64> {
        self.doc.get(element)?.layout.map(|l| l.top)
    }

    fn offset_height(&self, element: ElementId) -> Option<f64> {
        self.doc.get(element)?.layout.map(|l| l.height)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_y
    }

    fn set_scroll(&mut self, offset: f64) {
        self.scroll_y = self.clamp_scroll(offset);
        self.record(Change::Scroll {
            offset: self.scroll_y,
            smooth: false,
        });
    }

    // The simulated browser finishes native smooth scrolls instantly
    fn smooth_scroll_native(&mut self, offset: f64) {
        self.scroll_y = self.clamp_scroll(offset);
        self.record(Change::Scroll {
            offset: self.scroll_y,
            smooth: true,
        });
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.doc.get(element)?.attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> pageflow_core::Result<()> {
        self.element_mut(element)?
            .attrs
            .insert(name.to_string(), value.to_string());
        self.record(Change::Attribute {
            element,
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.doc
            .get(element)
            .is_some_and(|e| e.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> pageflow_core::Result<()> {
        if self.element_mut(element)?.classes.insert(class.to_string()) {
            self.record(Change::ClassAdded {
                element,
                class: class.to_string(),
            });
        }
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> pageflow_core::Result<()> {
        if self.element_mut(element)?.classes.remove(class) {
            self.record(Change::ClassRemoved {
                element,
                class: class.to_string(),
            });
        }
        Ok(())
    }

    fn set_style(&mut self, element: ElementId, prop: StyleProp, value: &str) -> pageflow_core::Result<()> {
        self.element_mut(element)?
            .styles
            .insert(prop, value.to_string());
        self.record(Change::Style {
            element,
            prop,
            value: value.to_string(),
        });
        Ok(())
    }

    fn text_content(&self, element: ElementId) -> String {
        self.doc
            .get(element)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn value(&self, element: ElementId) -> Option<String> {
        self.doc.get(element)?.value.clone()
    }

    fn focus(&mut self, element: ElementId) -> pageflow_core::Result<()> {
        self.element(element)?;
        self.focused = Some(element);
        self.record(Change::Focus { element });
        Ok(())
    }

    fn active_element(&self) -> Option<ElementId> {
        self.focused
    }

    fn append_to_head(&mut self, node: HeadNode) -> pageflow_core::Result<()> {
        self.head.push(node.clone());
        self.record(Change::Head { node });
        Ok(())
    }

    fn body(&self) -> Option<ElementId> {
        self.doc.query(&Selector::tag("body")).first().copied()
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;

    fn host() -> (SimHost, ElementId) {
        let mut doc = SimDocument::new();
        let section = doc.insert(ElementSpec::new("section").layout(300.0, 0.0, 800.0, 2_000.0), None);
        (SimHost::new(doc, Viewport::new(800.0, 600.0)), section)
    }

    #[test]
    fn test_bounding_box_follows_scroll() {
        let (mut host, section) = host();
        assert_eq!(host.bounding_box(section).map(|r| r.top), Some(300.0));
        host.set_scroll(100.0);
        assert_eq!(host.bounding_box(section).map(|r| r.top), Some(200.0));
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let (mut host, _) = host();
        host.set_scroll(10_000.0);
        assert_eq!(host.scroll_offset(), 1_700.0);
        host.set_scroll(-50.0);
        assert_eq!(host.scroll_offset(), 0.0);
    }

    #[test]
    fn test_class_changes_are_recorded_once() {
        let (mut host, section) = host();
        host.add_class(section, "active").unwrap();
        host.add_class(section, "active").unwrap();
        host.remove_class(section, "missing").unwrap();
        assert_eq!(
            host.mutations(),
            &[Mutation {
                at: 0,
                change: Change::ClassAdded {
                    element: section,
                    class: "active".to_string()
                }
            }]
        );
    }

    #[test]
    fn test_unknown_element_is_an_error() {
        let (mut host, _) = host();
        assert!(host.add_class(ElementId(42), "x").is_err());
        assert!(host.focus(ElementId(42)).is_err());
    }
}
