//! Step-scoped mutation watching.

use super::{MutationSource, TargetResolver};
use crate::controller::Request;
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Identifier of one installed watch. Never reused within a tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WatchId(pub u64);

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watch#{}", self.0)
    }
}

/// Callback handed to the environment on subscribe.
///
/// Notifying only enqueues a refresh request; the tour handles it on its
/// next [`pump`](crate::controller::Tour::pump).
#[derive(Clone, Debug)]
pub struct MutationSink {
    watch: WatchId,
    tx: Sender<Request>,
}

impl MutationSink {
    pub(crate) fn new(watch: WatchId, tx: Sender<Request>) -> Self {
        Self { watch, tx }
    }

    pub fn watch(&self) -> WatchId {
        self.watch
    }

    /// Report a mutation. Returns `false` once the tour is gone.
    pub fn notify(&self) -> bool {
        self.tx.send(Request::Mutated(self.watch)).is_ok()
    }
}

struct ActiveWatch<S> {
    id: WatchId,
    step: usize,
    subscription: S,
}

/// Holds at most one subscription, owned by the active step.
pub struct MutationWatcher<P: MutationSource> {
    active: Option<ActiveWatch<P::Subscription>>,
    next_id: u64,
    tx: Sender<Request>,
}

impl<P: MutationSource> MutationWatcher<P> {
    pub(crate) fn new(tx: Sender<Request>) -> Self {
        Self {
            active: None,
            next_id: 0,
            tx,
        }
    }

    /// Subscribe to the first node matching `selector` on behalf of `step`.
    ///
    /// Any previous subscription is released first. Returns `None` when the
    /// observed node is not on the page.
    pub fn install(
        &mut self,
        page: &mut P,
        resolver: &TargetResolver,
        step: usize,
        selector: &str,
    ) -> Option<WatchId> {
        self.release(page);

        let Some(node) = resolver.resolve(page, selector) else {
            warn!(step, selector, "observed element not found, mutations will not refresh this step");
            return None;
        };

        let id = WatchId(self.next_id);
        self.next_id += 1;
        let subscription = page.subscribe(&node, MutationSink::new(id, self.tx.clone()));
        debug!(step, selector, %id, "mutation watch installed");
        self.active = Some(ActiveWatch {
            id,
            step,
            subscription,
        });
        Some(id)
    }

    /// Release the current subscription, if any. Returns whether one was released.
    pub fn release(&mut self, page: &mut P) -> bool {
        match self.active.take() {
            Some(active) => {
                debug!(step = active.step, id = %active.id, "mutation watch released");
                page.unsubscribe(active.subscription);
                true
            }
            None => false,
        }
    }

    /// Whether `id` belongs to the live subscription.
    pub fn is_current(&self, id: WatchId) -> bool {
        self.active.as_ref().is_some_and(|a| a.id == id)
    }

    pub fn active_step(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.step)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl<P: MutationSource> fmt::Debug for MutationWatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationWatcher")
            .field("active_step", &self.active_step())
            .field("next_id", &self.next_id)
            .finish()
    }
}
