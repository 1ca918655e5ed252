//! Navigation requests issued from outside a transition.
//!
//! Content, hooks and renderers never call into the tour directly. They get
//! a [`NavHandle`] which enqueues requests; the tour drains the queue in
//! [`Tour::pump`](super::Tour::pump), one request at a time, so a transition
//! is never interleaved with another.

use crate::core::Direction;
use crate::page::WatchId;
use crossbeam_channel::{Receiver, Sender};

/// A queued command for the tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    GoTo(usize),
    Next,
    Prev,
    Close,
    /// A mutation was observed under the element watched by `WatchId`.
    Mutated(WatchId),
}

/// Cloneable sender of navigation requests.
#[derive(Clone, Debug)]
pub struct NavHandle {
    tx: Sender<Request>,
}

impl NavHandle {
    /// A fresh handle and the receiving end of its queue.
    pub fn channel() -> (Self, Receiver<Request>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    pub(crate) fn sender(&self) -> Sender<Request> {
        self.tx.clone()
    }

    pub fn goto_step(&self, index: usize) {
        self.send(Request::GoTo(index));
    }

    pub fn next(&self) {
        self.send(Request::Next);
    }

    pub fn prev(&self) {
        self.send(Request::Prev);
    }

    pub fn close(&self) {
        self.send(Request::Close);
    }

    fn send(&self, request: Request) {
        // the tour owns the receiver; a send can only fail once it is dropped
        let _ = self.tx.send(request);
    }
}

/// What content and hooks know about the step they belong to.
#[derive(Clone, Debug)]
pub struct NavContext {
    pub index: usize,
    pub total: usize,
    /// How the tour arrived at (or is leaving) this step.
    pub direction: Direction,
    nav: NavHandle,
}

impl NavContext {
    pub fn new(index: usize, total: usize, direction: Direction, nav: NavHandle) -> Self {
        Self {
            index,
            total,
            direction,
            nav,
        }
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }

    /// Request a jump to `index` once the current transition completes.
    pub fn go_to(&self, index: usize) {
        self.nav.goto_step(index);
    }

    pub fn next(&self) {
        self.nav.next();
    }

    pub fn prev(&self) {
        self.nav.prev();
    }

    pub fn close(&self) {
        self.nav.close();
    }

    pub fn nav(&self) -> &NavHandle {
        &self.nav
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_queued_in_order() {
        let (nav, rx) = NavHandle::channel();
        nav.next();
        nav.goto_step(4);
        nav.prev();
        nav.close();

        let queued: Vec<Request> = rx.try_iter().collect();
        assert_eq!(
            queued,
            vec![Request::Next, Request::GoTo(4), Request::Prev, Request::Close]
        );
    }

    #[test]
    fn context_forwards_to_handle() {
        let (nav, rx) = NavHandle::channel();
        let ctx = NavContext::new(4, 5, Direction::Forward, nav);

        assert!(ctx.is_last());
        assert!(!ctx.is_first());
        ctx.go_to(1);

        assert_eq!(rx.try_recv().ok(), Some(Request::GoTo(1)));
    }

    #[test]
    fn send_after_receiver_dropped_is_harmless() {
        let (nav, rx) = NavHandle::channel();
        drop(rx);
        nav.next();
    }
}
