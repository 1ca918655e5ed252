//! Selector to live node resolution.

use super::{Page, Rect};

/// Outcome of acquiring a step's target.
#[derive(Clone, Debug, PartialEq)]
pub enum Target<N> {
    /// Node found, scrolled to and measured after layout settled.
    Found { node: N, rect: Rect },
    /// Nothing matched the selector.
    Missing,
}

impl<N> Target<N> {
    pub fn node(&self) -> Option<&N> {
        match self {
            Target::Found { node, .. } => Some(node),
            Target::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Target::Missing)
    }
}

/// Resolves selectors against the page on every call.
///
/// No node is ever cached between calls: the page may have changed since
/// the step was last visited.
#[derive(Clone, Copy, Debug)]
pub struct TargetResolver {
    scroll_to_target: bool,
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TargetResolver {
    pub fn new(scroll_to_target: bool) -> Self {
        Self { scroll_to_target }
    }

    /// First match in document order, if any.
    pub fn resolve<P: Page>(&self, page: &P, selector: &str) -> Option<P::Node> {
        page.query_all(selector).into_iter().next()
    }

    /// Resolve, scroll into view, wait for layout, then measure.
    pub fn acquire<P: Page>(&self, page: &mut P, selector: &str) -> Target<P::Node> {
        let Some(node) = self.resolve(page, selector) else {
            return Target::Missing;
        };
        if self.scroll_to_target {
            page.scroll_into_view(&node);
        }
        page.settle_layout();
        let rect = page.measure(&node);
        Target::Found { node, rect }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::memory::MemoryPage;

    #[test]
    fn resolve_picks_first_in_document_order() {
        let page = MemoryPage::new();
        let first = page.insert("[data-tut=\"item\"]", Rect::new(0.0, 0.0, 10.0, 10.0));
        let _second = page.insert("[data-tut=\"item\"]", Rect::new(0.0, 50.0, 10.0, 10.0));

        let resolver = TargetResolver::default();
        assert_eq!(resolver.resolve(&page, "[data-tut=\"item\"]"), Some(first));
    }

    #[test]
    fn acquire_reports_missing_without_touching_layout() {
        let mut page = MemoryPage::new();
        let resolver = TargetResolver::default();

        let target = resolver.acquire(&mut page, "[data-tut=\"nowhere\"]");

        assert!(target.is_missing());
        assert!(page.scrolled().is_empty());
        assert_eq!(page.settle_count(), 0);
    }

    #[test]
    fn acquire_scrolls_settles_and_measures() {
        let mut page = MemoryPage::new();
        let rect = Rect::new(5.0, 900.0, 120.0, 40.0);
        let node = page.insert("[data-tut=\"scroll\"]", rect);

        let target = TargetResolver::default().acquire(&mut page, "[data-tut=\"scroll\"]");

        assert_eq!(target, Target::Found { node, rect });
        assert_eq!(page.scrolled(), &[node]);
        assert_eq!(page.settle_count(), 1);
    }

    #[test]
    fn acquire_can_skip_scrolling() {
        let mut page = MemoryPage::new();
        page.insert("[data-tut=\"fixed\"]", Rect::new(0.0, 0.0, 1.0, 1.0));

        let target = TargetResolver::new(false).acquire(&mut page, "[data-tut=\"fixed\"]");

        assert!(!target.is_missing());
        assert!(page.scrolled().is_empty());
        assert_eq!(page.settle_count(), 1);
    }

    #[test]
    fn resolution_follows_page_changes() {
        let page = MemoryPage::new();
        let node = page.insert("[data-tut=\"gone\"]", Rect::default());
        let resolver = TargetResolver::default();

        assert!(resolver.resolve(&page, "[data-tut=\"gone\"]").is_some());
        page.detach(node);
        assert!(resolver.resolve(&page, "[data-tut=\"gone\"]").is_none());
    }
}
