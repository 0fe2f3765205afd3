use tracing::debug;

use crate::host::{ElementId, EventKind, EventTarget, Host};
use crate::selector::{page, Selector};

/// What a click on an internal link should do
#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// `#` and `#top`: native smooth scroll to the top of the page
    ScrollTop,
    /// Animate to the element with this document top
    ScrollTo { top: f64 },
    /// Not an internal link, or its target does not exist
    Ignore,
}

/// Click routing for `a[href^="#"]`
#[derive(Debug, Clone, Default)]
pub struct InternalLinks {
    links: Vec<ElementId>,
}

impl InternalLinks {
    pub fn attach<H: Host>(host: &mut H) -> Self {
        let links = host.query(&page::internal_links());
        for &link in &links {
            host.listen(EventTarget::Element(link), EventKind::Click);
        }
        debug!(count = links.len(), "internal links wired");
        Self { links }
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.links.contains(&element)
    }

    pub fn resolve<H: Host>(&self, host: &H, link: ElementId) -> LinkAction {
        if !self.contains(link) {
            return LinkAction::Ignore;
        }
        let Some(href) = host.attribute(link, "href") else {
            return LinkAction::Ignore;
        };

        match href.as_str() {
            "#" | "#top" => LinkAction::ScrollTop,
            fragment => {
                let id = fragment.trim_start_matches('#');
                host.query(&Selector::id(id))
                    .first()
                    .and_then(|&target| host.offset_top(target))
                    .map_or(LinkAction::Ignore, |top| LinkAction::ScrollTo { top })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_resolves_fragment_targets() {
        let mut host = FakeHost::new();
        let top = host.add("a").attr("href", "#top").id();
        let about = host.add("a").attr("href", "#about").id();
        let missing = host.add("a").attr("href", "#missing").id();
        let external = host.add("a").attr("href", "https://example.com").id();
        host.add("section").attr("id", "about").layout(640.0, 0.0, 300.0, 1000.0);

        let links = InternalLinks::attach(&mut host);

        assert_eq!(links.resolve(&host, top), LinkAction::ScrollTop);
        assert_eq!(links.resolve(&host, about), LinkAction::ScrollTo { top: 640.0 });
        assert_eq!(links.resolve(&host, missing), LinkAction::Ignore);
        assert_eq!(links.resolve(&host, external), LinkAction::Ignore);
        assert!(host.is_listening(EventTarget::Element(about), EventKind::Click));
        assert!(!host.is_listening(EventTarget::Element(external), EventKind::Click));
    }
}
