//! Caller-supplied step hooks.

use crate::controller::NavContext;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a hook.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type HookResult = Result<(), HookError>;

/// Hook receiving the navigation context of its step.
pub type Hook = Arc<dyn Fn(&NavContext) -> HookResult + Send + Sync>;

/// Hook receiving the resolved target node as well; `None` when the target
/// was not on the page.
pub type NodeHook<N> = Arc<dyn Fn(Option<&N>, &NavContext) -> HookResult + Send + Sync>;

/// Which of the four hooks ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    PreAction,
    Action,
    PostAction,
    RewindAction,
}

impl HookKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreAction => "preAction",
            Self::Action => "action",
            Self::PostAction => "postAction",
            Self::RewindAction => "rewindAction",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hook failure, tagged with where it happened.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} hook of step {step} failed: {error}")]
pub struct HookFailure {
    pub kind: HookKind,
    pub step: usize,
    pub error: HookError,
}

/// The optional hooks of one step.
///
/// Every hook is optional; a missing hook is simply skipped.
///
/// # Example
///
/// ```rust
/// use tourguide::lifecycle::StepHooks;
///
/// let hooks: StepHooks<()> = StepHooks::new()
///     .pre_action(|_ctx| Ok(()))
///     .post_action(|ctx| {
///         println!("leaving step {}", ctx.index);
///         Ok(())
///     });
///
/// assert!(hooks.pre_action.is_some());
/// assert!(hooks.action.is_none());
/// ```
pub struct StepHooks<N> {
    /// Before the target is resolved and scrolled to.
    pub pre_action: Option<Hook>,
    /// Once the target is resolved and the overlay rendered against it.
    pub action: Option<NodeHook<N>>,
    /// When leaving this step forward, by jump, or by closing the tour.
    pub post_action: Option<Hook>,
    /// When the tour moves backward into this step.
    pub rewind_action: Option<Hook>,
}

impl<N> StepHooks<N> {
    pub fn new() -> Self {
        Self {
            pre_action: None,
            action: None,
            post_action: None,
            rewind_action: None,
        }
    }

    pub fn pre_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.pre_action = Some(Arc::new(f));
        self
    }

    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&N>, &NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(f));
        self
    }

    pub fn post_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.post_action = Some(Arc::new(f));
        self
    }

    pub fn rewind_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.rewind_action = Some(Arc::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pre_action.is_none()
            && self.action.is_none()
            && self.post_action.is_none()
            && self.rewind_action.is_none()
    }
}

impl<N> Default for StepHooks<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for StepHooks<N> {
    fn clone(&self) -> Self {
        Self {
            pre_action: self.pre_action.clone(),
            action: self.action.clone(),
            post_action: self.post_action.clone(),
            rewind_action: self.rewind_action.clone(),
        }
    }
}

impl<N> fmt::Debug for StepHooks<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepHooks")
            .field("pre_action", &self.pre_action.is_some())
            .field("action", &self.action.is_some())
            .field("post_action", &self.post_action.is_some())
            .field("rewind_action", &self.rewind_action.is_some())
            .finish()
    }
}
