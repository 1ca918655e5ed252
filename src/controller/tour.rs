//! The tour controller.

use super::error::TourError;
use super::events::TourEvent;
use super::nav::{NavContext, NavHandle, Request};
use super::render::{Frame, NoopRenderer, Placement, Renderer};
use crate::checkpoint::TourSnapshot;
use crate::config::TourConfig;
use crate::core::{
    Direction, StepDescriptor, StepRegistry, StepTransition, TourHistory, TourState,
};
use crate::lifecycle::{Departure, LifecycleDispatcher};
use crate::page::{MutationSource, MutationWatcher, Target, TargetResolver, WatchId};
use chrono::Utc;
use crossbeam_channel::Receiver;
use tracing::{debug, info, trace, warn};

/// Tour-level callback, called with the index of the step concerned.
pub type TourCallback = Box<dyn FnMut(usize)>;

/// Optional callbacks around the whole tour rather than single steps.
#[derive(Default)]
pub struct TourCallbacks {
    /// After the tour opened and its first step was activated.
    pub on_after_open: Option<TourCallback>,
    /// Before the tour closes, while the last step is still active.
    pub on_before_close: Option<TourCallback>,
    /// Whenever a step becomes active, including on open.
    pub on_step_change: Option<TourCallback>,
}

/// Outcome of [`Tour::pump`].
#[derive(Debug, Default)]
pub struct PumpReport {
    /// Requests that were acted on.
    pub processed: usize,
    /// Mutation notifications from released watches or a closed tour.
    pub ignored: usize,
    /// Errors of processed requests, in order.
    pub errors: Vec<TourError>,
}

impl PumpReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

struct Activation<N> {
    target: Option<N>,
    placement: Placement,
    missing_reported: bool,
    departed: bool,
}

/// Orchestrates a tour over a step registry.
///
/// All commands run to completion before returning. Navigation requested
/// by content, hooks or the renderer is queued and handled by [`Tour::pump`].
///
/// # Example
///
/// ```rust
/// use tourguide::controller::Tour;
/// use tourguide::core::{Content, StepDescriptor};
/// use tourguide::page::memory::MemoryPage;
/// use tourguide::page::Rect;
///
/// let page = MemoryPage::new();
/// page.insert("[data-tut=\"iso\"]", Rect::new(0.0, 0.0, 200.0, 40.0));
/// page.insert("[data-tut=\"logo\"]", Rect::new(0.0, 60.0, 64.0, 64.0));
///
/// let steps = vec![
///     StepDescriptor::new("[data-tut=\"iso\"]", Content::Static("The name of the tour".to_string())),
///     StepDescriptor::new("[data-tut=\"logo\"]", Content::Static("Our cool bus".to_string())),
/// ];
///
/// let mut tour = Tour::new(steps, page);
/// tour.open().unwrap();
/// tour.next().unwrap();
/// assert_eq!(tour.current_index(), Some(1));
///
/// tour.next().unwrap();
/// assert_eq!(tour.current_index(), Some(0));
///
/// tour.close().unwrap();
/// assert!(!tour.is_open());
/// ```
pub struct Tour<R, P: MutationSource> {
    registry: StepRegistry<R, P::Node>,
    page: P,
    renderer: Box<dyn Renderer<R, P::Node>>,
    config: TourConfig,
    callbacks: TourCallbacks,
    state: TourState,
    history: TourHistory,
    resolver: TargetResolver,
    watcher: MutationWatcher<P>,
    nav: NavHandle,
    inbox: Receiver<Request>,
    events: Vec<TourEvent>,
    active: Option<Activation<P::Node>>,
}

impl<R: Clone, P: MutationSource> Tour<R, P> {
    /// A closed tour with default configuration and a renderer that draws nothing.
    pub fn new(steps: impl Into<StepRegistry<R, P::Node>>, page: P) -> Self {
        Self::from_parts(
            steps.into(),
            page,
            Box::new(NoopRenderer),
            TourConfig::default(),
            TourCallbacks::default(),
        )
    }

    pub(crate) fn from_parts(
        registry: StepRegistry<R, P::Node>,
        page: P,
        renderer: Box<dyn Renderer<R, P::Node>>,
        config: TourConfig,
        callbacks: TourCallbacks,
    ) -> Self {
        let (nav, inbox) = NavHandle::channel();
        let watcher = MutationWatcher::new(nav.sender());
        Self {
            registry,
            page,
            renderer,
            resolver: TargetResolver::new(config.scroll_to_target),
            history: TourHistory::with_limit(config.history_limit),
            config,
            callbacks,
            state: TourState::closed(),
            watcher,
            nav,
            inbox,
            events: Vec::new(),
            active: None,
        }
    }

    /// Open at the configured start step.
    pub fn open(&mut self) -> Result<(), TourError> {
        self.open_at(self.config.start_at)
    }

    /// Open at `start`. No exit hook runs: there is no outgoing step.
    pub fn open_at(&mut self, start: usize) -> Result<(), TourError> {
        if self.state.is_open {
            return Err(TourError::AlreadyOpen {
                index: self.state.current_index,
            });
        }
        let len = self.registry.len();
        if start >= len {
            return Err(TourError::InvalidStartIndex { index: start, len });
        }
        self.registry.ensure_valid()?;

        let stale = self.inbox.try_iter().count();
        if stale > 0 {
            debug!(stale, "discarded requests queued while the tour was closed");
        }

        self.state = TourState::opened_at(start);
        self.history = TourHistory::with_limit(self.config.history_limit);
        info!(start, total = len, "tour opened");
        self.events.push(TourEvent::Opened {
            index: start,
            total: len,
        });

        let mut dispatcher = LifecycleDispatcher::new();
        self.activate(start, &mut dispatcher);
        if let Some(callback) = self.callbacks.on_after_open.as_mut() {
            callback(start);
        }
        self.notify_step_change(start);
        Self::conclude(dispatcher)
    }

    /// Replace the registry and open at `start`.
    ///
    /// The registry is only swapped when it is valid for `start`.
    pub fn open_with(
        &mut self,
        steps: impl Into<StepRegistry<R, P::Node>>,
        start: usize,
    ) -> Result<(), TourError> {
        if self.state.is_open {
            return Err(TourError::AlreadyOpen {
                index: self.state.current_index,
            });
        }
        let steps = steps.into();
        if start >= steps.len() {
            return Err(TourError::InvalidStartIndex {
                index: start,
                len: steps.len(),
            });
        }
        steps.ensure_valid()?;
        self.registry = steps;
        self.open_at(start)
    }

    /// Advance one step, wrapping from the last step to the first.
    pub fn next(&mut self) -> Result<(), TourError> {
        let current = self.require_open()?;
        let to = if current + 1 >= self.registry.len() {
            0
        } else {
            current + 1
        };
        self.transition(to, Direction::Forward)
    }

    /// Go back one step, wrapping from the first step to the last.
    pub fn prev(&mut self) -> Result<(), TourError> {
        let current = self.require_open()?;
        let to = if current == 0 {
            self.registry.len() - 1
        } else {
            current - 1
        };
        self.transition(to, Direction::Backward)
    }

    /// Jump to `index`. Jumping to the active step does nothing.
    pub fn go_to(&mut self, index: usize) -> Result<(), TourError> {
        let current = self.require_open()?;
        let len = self.registry.len();
        if index >= len {
            return Err(TourError::IndexOutOfRange { index, len });
        }
        if index == current {
            trace!(index, "jump to the active step ignored");
            return Ok(());
        }
        self.transition(index, Direction::Jump)
    }

    /// Close the tour. Closing a closed tour does nothing.
    ///
    /// The active step's `postAction` runs as the "leaving the tour" case,
    /// unless it already ran for this position.
    pub fn close(&mut self) -> Result<(), TourError> {
        if !self.state.is_open {
            return Ok(());
        }
        let index = self.state.current_index;
        if let Some(callback) = self.callbacks.on_before_close.as_mut() {
            callback(index);
        }

        let mut dispatcher = LifecycleDispatcher::new();
        let departed = self.active.as_ref().is_some_and(|a| a.departed);
        if !departed {
            self.depart(
                Departure::PostAction { from: index },
                self.state.direction,
                &mut dispatcher,
            );
        }
        self.watcher.release(&mut self.page);
        self.renderer.clear();
        self.active = None;
        self.state = TourState::closed();
        info!(step = index, "tour closed");
        self.events.push(TourEvent::Closed { index });
        Self::conclude(dispatcher)
    }

    /// Handle every request queued so far, in order.
    ///
    /// Requests queued while pumping wait for the next call.
    pub fn pump(&mut self) -> PumpReport {
        let pending: Vec<Request> = self.inbox.try_iter().collect();
        let mut report = PumpReport::default();
        for request in pending {
            let outcome = match request {
                Request::GoTo(index) => self.go_to(index),
                Request::Next => self.next(),
                Request::Prev => self.prev(),
                Request::Close => self.close(),
                Request::Mutated(watch) => {
                    if !self.refresh(watch) {
                        report.ignored += 1;
                        continue;
                    }
                    Ok(())
                }
            };
            report.processed += 1;
            if let Err(error) = outcome {
                warn!(?request, %error, "queued request failed");
                report.errors.push(error);
            }
        }
        report
    }

    /// Swap the renderer. An open tour repaints the active step right away.
    pub fn set_renderer<T>(&mut self, renderer: T)
    where
        T: Renderer<R, P::Node> + 'static,
    {
        self.renderer.clear();
        self.renderer = Box::new(renderer);
        if self.state.is_open {
            let index = self.state.current_index;
            if let Some(step) = self.registry.get(index).cloned() {
                self.render(index, &step, true);
            }
        }
    }

    /// Swap the descriptor at `index`.
    ///
    /// Takes effect the next time that step is activated or refreshed.
    pub fn replace_step(
        &mut self,
        index: usize,
        step: StepDescriptor<R, P::Node>,
    ) -> Result<StepDescriptor<R, P::Node>, TourError> {
        self.registry.replace(index, step)
    }

    /// Checkpoint of the running tour.
    pub fn snapshot(&self) -> Result<TourSnapshot, TourError> {
        if !self.state.is_open {
            return Err(TourError::NotOpen);
        }
        Ok(TourSnapshot::capture(
            self.state,
            self.history.clone(),
            self.registry.len(),
        ))
    }

    /// Reopen a closed tour where `snapshot` left off, restoring its history.
    ///
    /// The restored history follows this tour's `history_limit`, keeping the
    /// most recent transitions of the snapshot.
    pub fn resume(&mut self, snapshot: &TourSnapshot) -> Result<(), TourError> {
        if self.state.is_open {
            return Err(TourError::AlreadyOpen {
                index: self.state.current_index,
            });
        }
        let index = snapshot.resume_index(self.registry.len())?;
        let opened = self.open_at(index);
        if self.state.is_open {
            self.state = snapshot.state;
            self.history = snapshot.history.limited_to(self.config.history_limit);
            debug!(index, snapshot = %snapshot.id, "tour resumed from snapshot");
        }
        opened
    }

    /// Whether a step is currently active.
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Active step index, `None` while closed.
    pub fn current_index(&self) -> Option<usize> {
        self.state.position()
    }

    /// Direction of the last transition.
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Full navigation state, including the previous index.
    pub fn state(&self) -> &TourState {
        &self.state
    }

    /// Number of steps in the registry.
    pub fn total_steps(&self) -> usize {
        self.registry.len()
    }

    /// Steps of this tour, in order.
    pub fn registry(&self) -> &StepRegistry<R, P::Node> {
        &self.registry
    }

    /// Transitions of the current run, or of the last one once closed.
    pub fn history(&self) -> &TourHistory {
        &self.history
    }

    /// Settings this tour was built with.
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// The page the tour resolves targets on.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Mutable page access for the environment driving the tour.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Handle for external drivers such as keyboard shortcuts.
    pub fn nav_handle(&self) -> NavHandle {
        self.nav.clone()
    }

    /// Resolved target of the active step, if it was found.
    pub fn current_target(&self) -> Option<&P::Node> {
        self.active.as_ref().and_then(|a| a.target.as_ref())
    }

    /// Where the overlay of the active step was placed.
    pub fn current_placement(&self) -> Option<Placement> {
        self.active.as_ref().map(|a| a.placement)
    }

    /// Step currently owning the mutation watch, if any.
    pub fn watched_step(&self) -> Option<usize> {
        self.watcher.active_step()
    }

    /// Take all events reported since the last call.
    pub fn drain_events(&mut self) -> Vec<TourEvent> {
        std::mem::take(&mut self.events)
    }

    fn require_open(&self) -> Result<usize, TourError> {
        self.state.position().ok_or(TourError::NotOpen)
    }

    fn context(&self, index: usize, direction: Direction) -> NavContext {
        NavContext::new(index, self.registry.len(), direction, self.nav.clone())
    }

    fn conclude(dispatcher: LifecycleDispatcher) -> Result<(), TourError> {
        dispatcher
            .finish()
            .map_err(|failures| TourError::HookFailed { failures })
    }

    fn notify_step_change(&mut self, index: usize) {
        if let Some(callback) = self.callbacks.on_step_change.as_mut() {
            callback(index);
        }
    }

    fn transition(&mut self, to: usize, direction: Direction) -> Result<(), TourError> {
        let from = self.state.current_index;
        let mut dispatcher = LifecycleDispatcher::new();

        let departure = Departure::plan(from, to, direction, self.config.jump_policy);
        self.depart(departure, direction, &mut dispatcher);
        self.watcher.release(&mut self.page);

        self.state = self.state.advance(to, direction);
        self.history.push(StepTransition {
            from,
            to,
            direction,
            timestamp: Utc::now(),
        });
        debug!(from, to, %direction, "step transition");
        self.events.push(TourEvent::StepChanged {
            from,
            to,
            direction,
        });

        self.activate(to, &mut dispatcher);
        self.notify_step_change(to);
        Self::conclude(dispatcher)
    }

    fn depart(
        &mut self,
        departure: Departure,
        direction: Direction,
        dispatcher: &mut LifecycleDispatcher,
    ) {
        let step = departure.step();
        if let Some(descriptor) = self.registry.get(step) {
            let ctx = self.context(step, direction);
            dispatcher.depart(departure, &descriptor.hooks, &ctx);
        }
        if let Some(active) = self.active.as_mut() {
            active.departed = true;
        }
    }

    fn activate(&mut self, index: usize, dispatcher: &mut LifecycleDispatcher) {
        let Some(step) = self.registry.get(index).cloned() else {
            return;
        };
        let ctx = self.context(index, self.state.direction);
        dispatcher.pre_action(index, &step.hooks, &ctx);

        let target = self.resolver.acquire(&mut self.page, &step.selector);
        let missing = target.is_missing();
        if missing {
            self.report_missing(index, &step.selector);
        }
        let placement = self.placement_for(&step, &target);
        self.active = Some(Activation {
            target: into_node(target),
            placement,
            missing_reported: missing,
            departed: false,
        });
        self.render(index, &step, false);

        let node = self.current_target().cloned();
        dispatcher.action(index, &step.hooks, node.as_ref(), &ctx);

        if self.config.watch_mutations {
            if let Some(selector) = &step.observe {
                self.watcher
                    .install(&mut self.page, &self.resolver, index, selector);
            }
        }
    }

    /// Re-render the active step in place. Returns `false` for stale notifications.
    fn refresh(&mut self, watch: WatchId) -> bool {
        if !self.state.is_open || !self.watcher.is_current(watch) {
            trace!(%watch, "ignoring mutation from a released watch");
            return false;
        }
        let index = self.state.current_index;
        let Some(step) = self.registry.get(index).cloned() else {
            return false;
        };

        let target = self.resolver.acquire(&mut self.page, &step.selector);
        let placement = self.placement_for(&step, &target);
        let already_reported = self.active.as_ref().is_some_and(|a| a.missing_reported);
        if target.is_missing() && !already_reported {
            self.report_missing(index, &step.selector);
        }
        let missing = target.is_missing();
        if let Some(active) = self.active.as_mut() {
            active.target = into_node(target);
            active.placement = placement;
            active.missing_reported |= missing;
        }

        self.render(index, &step, true);
        debug!(step = index, %watch, "step refreshed after mutation");
        self.events.push(TourEvent::Refreshed { index });
        true
    }

    fn report_missing(&mut self, index: usize, selector: &str) {
        warn!(step = index, selector, "target not found, centring overlay");
        self.events.push(TourEvent::TargetNotFound {
            index,
            selector: selector.to_string(),
        });
    }

    fn placement_for(
        &self,
        step: &StepDescriptor<R, P::Node>,
        target: &Target<P::Node>,
    ) -> Placement {
        match target {
            Target::Found { rect, .. } => Placement::Anchored {
                rect: *rect,
                position: step.position.unwrap_or(self.config.default_position),
            },
            Target::Missing => Placement::Centered,
        }
    }

    fn render(&mut self, index: usize, step: &StepDescriptor<R, P::Node>, refresh: bool) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let ctx = self.context(index, self.state.direction);
        let frame = Frame {
            index,
            total: self.registry.len(),
            direction: self.state.direction,
            content: step.content.resolve(&ctx),
            placement: active.placement,
            target: active.target.clone(),
            style: step.style.clone(),
            refresh,
        };
        self.renderer.render(&frame, &self.nav);
    }
}

fn into_node<N>(target: Target<N>) -> Option<N> {
    match target {
        Target::Found { node, .. } => Some(node),
        Target::Missing => None,
    }
}
