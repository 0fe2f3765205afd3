//! Minimal in-memory host for unit tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::host::{ElementId, EventKind, EventTarget, HeadNode, Host, StyleProp};
use crate::selector::{Matchable, Selector};
use crate::viewport::{Rect, Viewport};
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct FakeElement {
    tag: String,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<StyleProp, String>,
    text: String,
    value: Option<String>,
    parent: Option<ElementId>,
    /// Document-relative top, left, height, width
    layout: Option<(f64, f64, f64, f64)>,
}

impl Matchable for FakeElement {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    elements: Vec<FakeElement>,
    listeners: BTreeSet<(EventTarget, EventKind)>,
    pub viewport: Viewport,
    pub scroll_y: f64,
    pub prefers_dark: bool,
    pub head: Vec<HeadNode>,
    pub frames_requested: usize,
    pub native_scrolls: Vec<f64>,
    /// Every style write, in order
    pub style_writes: Vec<(ElementId, StyleProp, String)>,
    /// Make every element mutation fail
    pub read_only: bool,
    focused: Option<ElementId>,
}

pub struct ElementBuilder<'a> {
    host: &'a mut FakeHost,
    id: ElementId,
}

impl ElementBuilder<'_> {
    fn element(&mut self) -> &mut FakeElement {
        &mut self.host.elements[self.id.0 as usize]
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element().attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.element().classes.insert(class.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element().text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.element().value = Some(value.to_string());
        self
    }

    pub fn parent(mut self, parent: ElementId) -> Self {
        self.element().parent = Some(parent);
        self
    }

    pub fn layout(mut self, top: f64, left: f64, height: f64, width: f64) -> Self {
        self.element().layout = Some((top, left, height, width));
        self
    }

    pub fn id(self) -> ElementId {
        self.id
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: &str) -> ElementBuilder<'_> {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(FakeElement {
            tag: tag.to_string(),
            ..Default::default()
        });
        ElementBuilder { host: self, id }
    }

    pub fn is_listening(&self, target: EventTarget, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    pub fn style(&self, element: ElementId, prop: StyleProp) -> Option<&str> {
        self.elements
            .get(element.0 as usize)?
            .styles
            .get(&prop)
            .map(String::as_str)
    }

    fn get(&self, element: ElementId) -> Result<&FakeElement> {
        self.elements
            .get(element.0 as usize)
            .ok_or(Error::UnknownElement(element))
    }

    fn get_mut(&mut self, element: ElementId) -> Result<&mut FakeElement> {
        if self.read_only {
            return Err(Error::Other("host is read-only".to_string()));
        }
        self.elements
            .get_mut(element.0 as usize)
            .ok_or(Error::UnknownElement(element))
    }

    fn chain(&self, element: ElementId) -> Vec<&dyn Matchable> {
        let mut chain: Vec<&dyn Matchable> = Vec::new();
        let mut cursor = Some(element);
        while let Some(id) = cursor {
            let Some(el) = self.elements.get(id.0 as usize) else {
                break;
            };
            chain.push(el);
            cursor = el.parent;
        }
        chain
    }

    fn is_descendant(&self, element: ElementId, root: ElementId) -> bool {
        let mut cursor = self.elements.get(element.0 as usize).and_then(|e| e.parent);
        while let Some(id) = cursor {
            if id == root {
                return true;
            }
            cursor = self.elements.get(id.0 as usize).and_then(|e| e.parent);
        }
        false
    }
}

impl Host for FakeHost {
    fn query(&self, selector: &Selector) -> Vec<ElementId> {
        (0..self.elements.len() as u32)
            .map(ElementId)
            .filter(|&id| selector.matches(&self.chain(id)))
            .collect()
    }

    fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.query(selector)
            .into_iter()
            .filter(|&id| self.is_descendant(id, root))
            .collect()
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) {
        self.listeners.insert((target, kind));
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        let (top, left, height, width) = self.elements.get(element.0 as usize)?.layout?;
        let top = top - self.scroll_y;
        Some(Rect::new(top, left, top + height, left + width))
    }

    fn offset_top(&self, element: ElementId) -> Option<f64> {
        self.elements.get(element.0 as usize)?.layout.map(|l| l.0)
    }

    fn offset_height(&self, element: ElementId) -> Option<f64> {
        self.elements.get(element.0 as usize)?.layout.map(|l| l.2)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_y
    }

    fn set_scroll(&mut self, offset: f64) {
        self.scroll_y = offset.max(0.0);
    }

    fn smooth_scroll_native(&mut self, offset: f64) {
        self.native_scrolls.push(offset);
        self.scroll_y = offset.max(0.0);
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.get(element).ok()?.attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> Result<()> {
        self.get_mut(element)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.get(element).is_ok_and(|e| e.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()> {
        self.get_mut(element)?.classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<()> {
        self.get_mut(element)?.classes.remove(class);
        Ok(())
    }

    fn set_style(&mut self, element: ElementId, prop: StyleProp, value: &str) -> Result<()> {
        self.get_mut(element)?.styles.insert(prop, value.to_string());
        self.style_writes.push((element, prop, value.to_string()));
        Ok(())
    }

    fn text_content(&self, element: ElementId) -> String {
        self.get(element).map(|e| e.text.clone()).unwrap_or_default()
    }

    fn value(&self, element: ElementId) -> Option<String> {
        self.get(element).ok()?.value.clone()
    }

    fn focus(&mut self, element: ElementId) -> Result<()> {
        self.get(element)?;
        self.focused = Some(element);
        Ok(())
    }

    fn active_element(&self) -> Option<ElementId> {
        self.focused
    }

    fn append_to_head(&mut self, node: HeadNode) -> Result<()> {
        self.head.push(node);
        Ok(())
    }

    fn body(&self) -> Option<ElementId> {
        self.query(&Selector::tag("body")).first().copied()
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark
    }
}
