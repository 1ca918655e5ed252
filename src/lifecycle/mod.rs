//! Step lifecycle hooks and their dispatch.
//!
//! Per activation the order is fixed: `preAction`, target resolution,
//! render, `action`. Per departure exactly one of `postAction` and
//! `rewindAction` runs, chosen by [`Departure::plan`].

mod dispatcher;
mod hooks;

pub use dispatcher::{Departure, LifecycleDispatcher};
pub use hooks::{Hook, HookError, HookFailure, HookKind, HookResult, NodeHook, StepHooks};
