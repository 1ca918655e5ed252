//! Hook dispatch for a single transition.
//!
//! A [`LifecycleDispatcher`] lives for exactly one transition. It fires the
//! hooks it is asked to fire and accumulates ALL failures instead of
//! stopping at the first one, so the transition itself always completes.

use super::hooks::{HookFailure, HookKind, HookResult, StepHooks};
use crate::config::JumpPolicy;
use crate::controller::NavContext;
use crate::core::Direction;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{trace, warn};

/// The single exit hook a departure runs.
///
/// Forward and jump departures run the outgoing step's `postAction`. A
/// backward departure runs `rewindAction` of the step being rewound into
/// instead, so that step can restore the page state it expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Departure {
    PostAction { from: usize },
    RewindAction { into: usize },
}

impl Departure {
    pub fn plan(from: usize, to: usize, direction: Direction, policy: JumpPolicy) -> Self {
        match direction {
            Direction::Backward => Departure::RewindAction { into: to },
            Direction::Jump if policy == JumpPolicy::RewindWhenEarlier && to < from => {
                Departure::RewindAction { into: to }
            }
            Direction::Forward | Direction::Jump => Departure::PostAction { from },
        }
    }

    /// Index of the step whose hook runs.
    pub fn step(&self) -> usize {
        match self {
            Departure::PostAction { from } => *from,
            Departure::RewindAction { into } => *into,
        }
    }

    pub fn kind(&self) -> HookKind {
        match self {
            Departure::PostAction { .. } => HookKind::PostAction,
            Departure::RewindAction { .. } => HookKind::RewindAction,
        }
    }
}

/// Fires hooks for one transition and collects their outcomes.
#[derive(Default)]
pub struct LifecycleDispatcher {
    outcomes: Vec<Validation<(), NonEmptyVec<HookFailure>>>,
    fired: Vec<(HookKind, usize)>,
}

impl LifecycleDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_action<N>(&mut self, step: usize, hooks: &StepHooks<N>, ctx: &NavContext) {
        let result = hooks.pre_action.as_ref().map(|hook| hook(ctx));
        self.record(HookKind::PreAction, step, result);
    }

    pub fn action<N>(
        &mut self,
        step: usize,
        hooks: &StepHooks<N>,
        node: Option<&N>,
        ctx: &NavContext,
    ) {
        let result = hooks.action.as_ref().map(|hook| hook(node, ctx));
        self.record(HookKind::Action, step, result);
    }

    /// Run the exit hook chosen by `departure`. `hooks` must belong to
    /// `departure.step()`.
    pub fn depart<N>(&mut self, departure: Departure, hooks: &StepHooks<N>, ctx: &NavContext) {
        let hook = match departure {
            Departure::PostAction { .. } => hooks.post_action.as_ref(),
            Departure::RewindAction { .. } => hooks.rewind_action.as_ref(),
        };
        let result = hook.map(|hook| hook(ctx));
        self.record(departure.kind(), departure.step(), result);
    }

    fn record(&mut self, kind: HookKind, step: usize, result: Option<HookResult>) {
        let Some(result) = result else {
            return;
        };
        trace!(hook = %kind, step, "hook fired");
        self.fired.push((kind, step));
        self.outcomes.push(match result {
            Ok(()) => Validation::success(()),
            Err(error) => {
                warn!(hook = %kind, step, %error, "hook failed");
                Validation::fail(HookFailure { kind, step, error })
            }
        });
    }

    /// Hooks that actually ran, in order.
    pub fn fired(&self) -> &[(HookKind, usize)] {
        &self.fired
    }

    /// All failures of the transition, if any.
    pub fn finish(self) -> Result<(), NonEmptyVec<HookFailure>> {
        if self.outcomes.is_empty() {
            return Ok(());
        }
        match Validation::all_vec(self.outcomes) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(failures) => Err(failures),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::NavHandle;
    use crate::lifecycle::HookError;
    use std::sync::{Arc, Mutex};

    fn ctx(index: usize) -> NavContext {
        let (nav, _inbox) = NavHandle::channel();
        NavContext::new(index, 3, Direction::Forward, nav)
    }

    #[test]
    fn backward_departure_rewinds_into_destination() {
        let plan = Departure::plan(2, 1, Direction::Backward, JumpPolicy::AlwaysPostAction);
        assert_eq!(plan, Departure::RewindAction { into: 1 });
        assert_eq!(plan.step(), 1);
        assert_eq!(plan.kind(), HookKind::RewindAction);
    }

    #[test]
    fn forward_departure_posts_from_origin() {
        let plan = Departure::plan(2, 0, Direction::Forward, JumpPolicy::AlwaysPostAction);
        assert_eq!(plan, Departure::PostAction { from: 2 });
    }

    #[test]
    fn jump_policy_decides_earlier_jumps() {
        assert_eq!(
            Departure::plan(4, 1, Direction::Jump, JumpPolicy::AlwaysPostAction),
            Departure::PostAction { from: 4 }
        );
        assert_eq!(
            Departure::plan(4, 1, Direction::Jump, JumpPolicy::RewindWhenEarlier),
            Departure::RewindAction { into: 1 }
        );
        assert_eq!(
            Departure::plan(1, 4, Direction::Jump, JumpPolicy::RewindWhenEarlier),
            Departure::PostAction { from: 1 }
        );
    }

    #[test]
    fn absent_hooks_are_silent() {
        let hooks: StepHooks<()> = StepHooks::new();
        let mut dispatcher = LifecycleDispatcher::new();

        dispatcher.pre_action(0, &hooks, &ctx(0));
        dispatcher.action(0, &hooks, None, &ctx(0));
        dispatcher.depart(Departure::PostAction { from: 0 }, &hooks, &ctx(0));

        assert!(dispatcher.fired().is_empty());
        assert!(dispatcher.finish().is_ok());
    }

    #[test]
    fn depart_runs_exactly_one_exit_hook() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let post_log = Arc::clone(&log);
        let rewind_log = Arc::clone(&log);
        let hooks: StepHooks<()> = StepHooks::new()
            .post_action(move |_| {
                post_log.lock().unwrap().push("post");
                Ok(())
            })
            .rewind_action(move |_| {
                rewind_log.lock().unwrap().push("rewind");
                Ok(())
            });

        let mut dispatcher = LifecycleDispatcher::new();
        dispatcher.depart(Departure::RewindAction { into: 1 }, &hooks, &ctx(1));

        assert_eq!(*log.lock().unwrap(), vec!["rewind"]);
        assert_eq!(dispatcher.fired(), &[(HookKind::RewindAction, 1)]);
    }

    #[test]
    fn failures_are_accumulated_not_short_circuited() {
        let reached_action = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&reached_action);
        let hooks: StepHooks<()> = StepHooks::new()
            .pre_action(|_| Err(HookError::new("dropdown missing")))
            .action(move |_, _| {
                *flag.lock().unwrap() = true;
                Err(HookError::new("focus failed"))
            });

        let mut dispatcher = LifecycleDispatcher::new();
        dispatcher.pre_action(2, &hooks, &ctx(2));
        dispatcher.action(2, &hooks, None, &ctx(2));

        assert!(*reached_action.lock().unwrap());
        let failures = dispatcher.finish().unwrap_err();
        assert_eq!(failures.len(), 2);
        assert!(failures
            .iter()
            .any(|f| f.kind == HookKind::PreAction && f.step == 2));
        assert!(failures
            .iter()
            .any(|f| f.kind == HookKind::Action && f.error.message() == "focus failed"));
    }

    #[test]
    fn action_receives_resolved_node() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let hooks: StepHooks<u32> = StepHooks::new().action(move |node, _| {
            *sink.lock().unwrap() = node.copied();
            Ok(())
        });

        let mut dispatcher = LifecycleDispatcher::new();
        dispatcher.action(0, &hooks, Some(&42), &ctx(0));

        assert_eq!(*seen.lock().unwrap(), Some(42));
    }
}
