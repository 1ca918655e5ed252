//! In-memory page.
//!
//! A flat list of nodes standing in for a document: each node carries the
//! selectors it matches, a measured rectangle and an optional parent.
//! Insertion order is document order. Every capability call is recorded so
//! callers can check what the engine did to the page.
//!
//! [`MemoryPage`] is a shared handle: clones see and change the same
//! document, so step hooks can hold one while the tour owns another.

use super::{MutationSink, MutationSource, Page, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle to a node of a [`MemoryPage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Handle returned by [`MemoryPage::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemorySubscription(u64);

#[derive(Clone, Debug)]
struct MemoryNode {
    selectors: Vec<String>,
    rect: Rect,
    parent: Option<NodeId>,
    attached: bool,
}

#[derive(Debug, Default)]
struct Document {
    nodes: Vec<MemoryNode>,
    subscriptions: BTreeMap<u64, (NodeId, MutationSink)>,
    next_subscription: u64,
    scrolled: Vec<NodeId>,
    settles: usize,
    subscribes: usize,
    unsubscribes: usize,
}

impl Document {
    fn push(&mut self, selectors: Vec<String>, rect: Rect, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            selectors,
            rect,
            parent,
            attached: true,
        });
        id
    }

    fn set_attached(&mut self, id: NodeId, attached: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.attached = attached;
        }
    }

    fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|n| n.parent);
        }
        false
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.nodes.get(current.0) {
                Some(node) if node.attached => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }
}

/// Document model backed by a `Vec`, shared between clones.
///
/// # Example
///
/// ```rust
/// use tourguide::page::memory::MemoryPage;
/// use tourguide::page::{Page, Rect};
///
/// let page = MemoryPage::new();
/// let logo = page.insert("[data-tut=\"logo\"]", Rect::new(0.0, 0.0, 64.0, 64.0));
///
/// let hook_side = page.clone();
/// hook_side.detach(logo);
///
/// assert!(page.query_all("[data-tut=\"logo\"]").is_empty());
/// hook_side.reattach(logo);
/// assert_eq!(page.query_all("[data-tut=\"logo\"]"), vec![logo]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryPage {
    doc: Arc<Mutex<Document>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves plain data behind, still usable.
    fn doc(&self) -> MutexGuard<'_, Document> {
        self.doc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a top-level node matching `selector`.
    pub fn insert(&self, selector: impl Into<String>, rect: Rect) -> NodeId {
        self.doc().push(vec![selector.into()], rect, None)
    }

    /// Append a node nested under `parent`.
    pub fn insert_child(&self, parent: NodeId, selector: impl Into<String>, rect: Rect) -> NodeId {
        self.doc().push(vec![selector.into()], rect, Some(parent))
    }

    /// Append a node matching several selectors at once.
    pub fn insert_matching<I, S>(&self, selectors: I, rect: Rect) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selectors = selectors.into_iter().map(Into::into).collect();
        self.doc().push(selectors, rect, None)
    }

    /// Remove a node (and, implicitly, its subtree) from query results.
    pub fn detach(&self, id: NodeId) {
        self.doc().set_attached(id, false);
    }

    /// Put a detached node back.
    pub fn reattach(&self, id: NodeId) {
        self.doc().set_attached(id, true);
    }

    /// Whether `id` and all its ancestors are attached.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.doc().is_attached(id)
    }

    pub fn set_rect(&self, id: NodeId, rect: Rect) {
        if let Some(node) = self.doc().nodes.get_mut(id.0) {
            node.rect = rect;
        }
    }

    /// Simulate a mutation at `id`.
    ///
    /// Every subscription on `id` or one of its ancestors is notified.
    /// Returns the number of sinks notified.
    pub fn mutate(&self, id: NodeId) -> usize {
        let doc = self.doc();
        doc.subscriptions
            .values()
            .filter(|(observed, sink)| doc.is_within(id, *observed) && sink.notify())
            .count()
    }

    /// Nodes scrolled into view, oldest first.
    pub fn scrolled(&self) -> Vec<NodeId> {
        self.doc().scrolled.clone()
    }

    pub fn settle_count(&self) -> usize {
        self.doc().settles
    }

    pub fn subscribe_count(&self) -> usize {
        self.doc().subscribes
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.doc().unsubscribes
    }

    pub fn active_subscriptions(&self) -> usize {
        self.doc().subscriptions.len()
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let doc = self.doc();
        doc.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
            .filter(|(id, node)| node.selectors.iter().any(|s| s == selector) && doc.is_attached(*id))
            .map(|(id, _)| id)
            .collect()
    }

    fn scroll_into_view(&mut self, node: &NodeId) {
        self.doc().scrolled.push(*node);
    }

    fn settle_layout(&mut self) {
        self.doc().settles += 1;
    }

    fn measure(&self, node: &NodeId) -> Rect {
        self.doc().nodes.get(node.0).map(|n| n.rect).unwrap_or_default()
    }
}

impl MutationSource for MemoryPage {
    type Subscription = MemorySubscription;

    fn subscribe(&mut self, node: &NodeId, sink: MutationSink) -> MemorySubscription {
        let mut doc = self.doc();
        let key = doc.next_subscription;
        doc.next_subscription += 1;
        doc.subscribes += 1;
        doc.subscriptions.insert(key, (*node, sink));
        MemorySubscription(key)
    }

    fn unsubscribe(&mut self, subscription: MemorySubscription) {
        let mut doc = self.doc();
        if doc.subscriptions.remove(&subscription.0).is_some() {
            doc.unsubscribes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Request;
    use crate::page::WatchId;

    #[test]
    fn query_all_respects_document_order() {
        let page = MemoryPage::new();
        let a = page.insert("[data-tut=\"x\"]", Rect::default());
        page.insert("[data-tut=\"y\"]", Rect::default());
        let c = page.insert_matching(["[data-tut=\"x\"]", ".highlight"], Rect::default());

        assert_eq!(page.query_all("[data-tut=\"x\"]"), vec![a, c]);
        assert_eq!(page.query_all(".highlight"), vec![c]);
    }

    #[test]
    fn detached_subtree_is_not_queryable() {
        let page = MemoryPage::new();
        let section = page.insert("section", Rect::default());
        let button = page.insert_child(section, "button", Rect::default());

        page.detach(section);
        assert!(page.query_all("button").is_empty());

        page.reattach(section);
        assert_eq!(page.query_all("button"), vec![button]);
    }

    #[test]
    fn mutation_under_observed_node_notifies() {
        let mut page = MemoryPage::new();
        let observed = page.insert("[data-tut=\"observe\"]", Rect::default());
        let child = page.insert_child(observed, "li", Rect::default());
        let unrelated = page.insert("footer", Rect::default());
        let (tx, rx) = crossbeam_channel::unbounded();

        page.subscribe(&observed, MutationSink::new(WatchId(7), tx));

        assert_eq!(page.mutate(child), 1);
        assert_eq!(page.mutate(unrelated), 0);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![Request::Mutated(WatchId(7))]);
    }

    #[test]
    fn unsubscribe_stops_notifications_and_counts_once() {
        let mut page = MemoryPage::new();
        let observed = page.insert("div", Rect::default());
        let (tx, _rx) = crossbeam_channel::unbounded();

        let sub = page.subscribe(&observed, MutationSink::new(WatchId(0), tx));
        page.unsubscribe(sub);
        page.unsubscribe(sub);

        assert_eq!(page.mutate(observed), 0);
        assert_eq!(page.subscribe_count(), 1);
        assert_eq!(page.unsubscribe_count(), 1);
    }

    #[test]
    fn measure_reflects_updated_geometry() {
        let page = MemoryPage::new();
        let node = page.insert("div", Rect::new(0.0, 0.0, 10.0, 10.0));
        page.set_rect(node, Rect::new(5.0, 5.0, 20.0, 20.0));

        assert_eq!(page.measure(&node), Rect::new(5.0, 5.0, 20.0, 20.0));
        assert_eq!(page.measure(&NodeId(99)), Rect::default());
    }

    #[test]
    fn clones_share_one_document() {
        let mut page = MemoryPage::new();
        let hooks = page.clone();
        let menu = page.insert("[data-tut=\"menu\"]", Rect::default());
        let item = hooks.insert_child(menu, "[data-tut=\"item\"]", Rect::default());

        hooks.detach(menu);
        assert!(page.query_all("[data-tut=\"item\"]").is_empty());
        assert!(!page.is_attached(item));

        page.scroll_into_view(&item);
        assert_eq!(hooks.scrolled(), vec![item]);
    }
}
