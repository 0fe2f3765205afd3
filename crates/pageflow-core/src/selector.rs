//! Typed element selectors.
//!
//! A `Selector` renders to CSS selector text for hosts backed by a real DOM,
//! and can be evaluated directly against anything implementing [`Matchable`].

use std::fmt;

/// How an attribute selector compares the attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    Present,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),
    Attr { name: String, matcher: AttrMatch },
    /// Compound selector: every part must match the same element
    All(Vec<Selector>),
    /// Selector list: any part may match
    Any(Vec<Selector>),
    /// `target` matching an element that has an ancestor matching `ancestor`
    Descendant {
        ancestor: Box<Selector>,
        target: Box<Selector>,
    },
}

/// Element view a selector can be evaluated against
pub trait Matchable {
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl Selector {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn has_attr(name: impl Into<String>) -> Self {
        Self::Attr {
            name: name.into(),
            matcher: AttrMatch::Present,
        }
    }

    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attr {
            name: name.into(),
            matcher: AttrMatch::Equals(value.into()),
        }
    }

    pub fn attr_prefix(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::Attr {
            name: name.into(),
            matcher: AttrMatch::Prefix(prefix.into()),
        }
    }

    pub fn and(self, other: Selector) -> Self {
        match self {
            Self::All(mut parts) => {
                parts.push(other);
                Self::All(parts)
            }
            first => Self::All(vec![first, other]),
        }
    }

    pub fn within(self, ancestor: Selector) -> Self {
        Self::Descendant {
            ancestor: Box::new(ancestor),
            target: Box::new(self),
        }
    }

    /// Evaluate against an element and its ancestors.
    ///
    /// `chain[0]` is the element itself, followed by its ancestors from the
    /// nearest parent up to the root.
    pub fn matches(&self, chain: &[&dyn Matchable]) -> bool {
        let Some(element) = chain.first() else {
            return false;
        };
        match self {
            Self::Tag(tag) => element.tag().eq_ignore_ascii_case(tag),
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.attribute("id") == Some(id.as_str()),
            Self::Attr { name, matcher } => match (element.attribute(name), matcher) {
                (None, _) => false,
                (Some(_), AttrMatch::Present) => true,
                (Some(value), AttrMatch::Equals(expected)) => value == expected,
                (Some(value), AttrMatch::Prefix(prefix)) => value.starts_with(prefix.as_str()),
            },
            Self::All(parts) => parts.iter().all(|part| part.matches(chain)),
            Self::Any(parts) => parts.iter().any(|part| part.matches(chain)),
            Self::Descendant { ancestor, target } => {
                target.matches(chain) && (1..chain.len()).any(|i| ancestor.matches(&chain[i..]))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Attr { name, matcher } => match matcher {
                AttrMatch::Present => write!(f, "[{name}]"),
                AttrMatch::Equals(value) => write!(f, "[{name}=\"{value}\"]"),
                AttrMatch::Prefix(prefix) => write!(f, "[{name}^=\"{prefix}\"]"),
            },
            Self::All(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
            Self::Any(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Self::Descendant { ancestor, target } => write!(f, "{ancestor} {target}"),
        }
    }
}

/// Selectors for the page structure the coordinator enhances
pub mod page {
    use super::Selector;

    /// `a[href^="#"]`
    pub fn internal_links() -> Selector {
        Selector::tag("a").and(Selector::attr_prefix("href", "#"))
    }

    /// `.nav`
    pub fn nav() -> Selector {
        Selector::class("nav")
    }

    /// `.nav a[href^="#"]`
    pub fn nav_links() -> Selector {
        internal_links().within(nav())
    }

    /// `section[id]`
    pub fn sections() -> Selector {
        Selector::tag("section").and(Selector::has_attr("id"))
    }

    /// `.fade-in`
    pub fn fade_in() -> Selector {
        Selector::class("fade-in")
    }

    /// `.card, .privacy-section`
    pub fn reveal_cards() -> Selector {
        Selector::Any(vec![Selector::class("card"), Selector::class("privacy-section")])
    }

    /// `.btn`
    pub fn buttons() -> Selector {
        Selector::class("btn")
    }

    /// `.card`
    pub fn cards() -> Selector {
        Selector::class("card")
    }

    /// `form`
    pub fn forms() -> Selector {
        Selector::tag("form")
    }

    /// `input[required], textarea[required]`
    pub fn required_fields() -> Selector {
        Selector::Any(vec![
            Selector::tag("input").and(Selector::has_attr("required")),
            Selector::tag("textarea").and(Selector::has_attr("required")),
        ])
    }

    /// `img[data-src]`
    pub fn lazy_images() -> Selector {
        Selector::tag("img").and(Selector::has_attr("data-src"))
    }

    /// `img`
    pub fn images() -> Selector {
        Selector::tag("img")
    }

    /// `a, button, input, textarea, select`
    pub fn focusable() -> Selector {
        Selector::Any(
            ["a", "button", "input", "textarea", "select"]
                .into_iter()
                .map(Selector::tag)
                .collect(),
        )
    }
}
