//! Page capabilities the engine depends on.
//!
//! The engine never touches a real document. It resolves selectors,
//! scrolls, waits for layout and measures through [`Page`], and watches for
//! mutations through [`MutationSource`]. [`memory::MemoryPage`] is an
//! in-memory implementation of both.

pub mod memory;
mod resolver;
mod watcher;

pub use resolver::{Target, TargetResolver};
pub use watcher::{MutationSink, MutationWatcher, WatchId};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Measured geometry of a node, in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Document access: selector queries, scrolling and measurement.
pub trait Page {
    /// Handle to a live element.
    type Node: Clone + Debug;

    /// All nodes matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Bring `node` into the viewport.
    fn scroll_into_view(&mut self, node: &Self::Node);

    /// Block until the next paint/layout cycle has completed.
    ///
    /// Measurements taken before this returns may be stale.
    fn settle_layout(&mut self);

    fn measure(&self, node: &Self::Node) -> Rect;
}

/// Subscription to structural and attribute mutations under a node.
pub trait MutationSource: Page {
    /// Environment handle for an active subscription.
    type Subscription: Debug;

    /// Start delivering mutations under `node` to `sink`.
    fn subscribe(&mut self, node: &Self::Node, sink: MutationSink) -> Self::Subscription;

    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_rect_is_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(10.0, 10.0, 0.0, 20.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
