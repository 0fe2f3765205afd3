//! Flat element arena with fixed layout.
//!
//! Elements never move: each carries an optional document-relative box and
//! the host derives viewport geometry from the scroll offset. Parents must be
//! inserted before their children, so arena order is document order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use pageflow_core::selector::Matchable;
use pageflow_core::{ElementId, Selector, StyleProp};

/// Document-relative layout box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Description of one element, as written in scenario files
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    /// Name the scenario uses to refer to this element
    pub key: Option<String>,
    /// Key of the parent element
    pub parent: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub value: Option<String>,
    pub layout: Option<Layout>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn parent(mut self, key: impl Into<String>) -> Self {
        self.parent = Some(key.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn layout(mut self, top: f64, left: f64, width: f64, height: f64) -> Self {
        self.layout = Some(Layout::new(top, left, width, height));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimElement {
    pub tag: String,
    pub key: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<StyleProp, String>,
    pub text: String,
    pub value: Option<String>,
    pub parent: Option<ElementId>,
    pub layout: Option<Layout>,
}

impl Matchable for SimElement {
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

#[derive(Debug, Clone, Default)]
pub struct SimDocument {
    elements: Vec<SimElement>,
    keys: BTreeMap<String, ElementId>,
}

impl SimDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. `parent` is resolved by the caller.
    pub fn insert(&mut self, spec: ElementSpec, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        if let Some(key) = &spec.key {
            self.keys.insert(key.clone(), id);
        }
        self.elements.push(SimElement {
            tag: spec.tag,
            key: spec.key,
            classes: spec.classes.into_iter().collect(),
            attrs: spec.attrs,
            styles: BTreeMap::new(),
            text: spec.text,
            value: spec.value,
            parent,
            layout: spec.layout,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&SimElement> {
        self.elements.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut SimElement> {
        self.elements.get_mut(id.0 as usize)
    }

    pub fn by_key(&self, key: &str) -> Option<ElementId> {
        self.keys.get(key).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len() as u32).map(ElementId)
    }

    /// `id` followed by its ancestors, nearest first
    pub fn ancestry(&self, id: ElementId) -> Vec<ElementId> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(element) = self.get(current) else {
                break;
            };
            chain.push(current);
            cursor = element.parent;
        }
        chain
    }

    pub fn is_descendant(&self, id: ElementId, root: ElementId) -> bool {
        self.ancestry(id).into_iter().skip(1).any(|a| a == root)
    }

    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        let chain = self
            .ancestry(id)
            .into_iter()
            .filter_map(|a| self.get(a))
            .map(|e| e as &dyn Matchable)
            .collect::<Vec<_>>();
        !chain.is_empty() && selector.matches(&chain)
    }

    pub fn query(&self, selector: &Selector) -> Vec<ElementId> {
        self.ids().filter(|&id| self.matches(id, selector)).collect()
    }

    /// Lowest layout edge on the page
    pub fn content_height(&self) -> f64 {
        self.elements
            .iter()
            .filter_map(|e| e.layout.as_ref())
            .map(Layout::bottom)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendant_query() {
        let mut doc = SimDocument::new();
        let nav = doc.insert(ElementSpec::new("nav").class("nav").key("nav"), None);
        let link = doc.insert(ElementSpec::new("a").attr("href", "#about"), Some(nav));
        let stray = doc.insert(ElementSpec::new("a").attr("href", "#about"), None);

        let selector = Selector::attr_eq("href", "#about").within(Selector::class("nav"));
        assert_eq!(doc.query(&selector), vec![link]);
        assert!(doc.is_descendant(link, nav));
        assert!(!doc.is_descendant(stray, nav));
        assert_eq!(doc.by_key("nav"), Some(nav));
    }

    #[test]
    fn test_content_height() {
        let mut doc = SimDocument::new();
        assert_eq!(doc.content_height(), 0.0);
        doc.insert(ElementSpec::new("section").layout(0.0, 0.0, 100.0, 900.0), None);
        doc.insert(ElementSpec::new("footer").layout(900.0, 0.0, 100.0, 300.0), None);
        assert_eq!(doc.content_height(), 1_200.0);
    }
}
