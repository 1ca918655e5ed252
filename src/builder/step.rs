//! Builder for step descriptors.

use crate::builder::error::BuildError;
use crate::controller::NavContext;
use crate::core::{Content, Position, StepDescriptor, StyleOverrides};
use crate::lifecycle::{HookResult, StepHooks};

/// Builder for constructing steps with a fluent API.
///
/// # Example
///
/// ```
/// use tourguide::builder::StepBuilder;
/// use tourguide::core::Position;
///
/// let step = StepBuilder::<String, ()>::new("[data-tut=\"reactour__position\"]")
///     .content("Positioned on the left when there is room".to_string())
///     .position(Position::Left)
///     .build()
///     .unwrap();
///
/// assert_eq!(step.position, Some(Position::Left));
/// ```
pub struct StepBuilder<R, N> {
    selector: String,
    content: Option<Content<R>>,
    position: Option<Position>,
    style: Option<StyleOverrides>,
    hooks: StepHooks<N>,
    observe: Option<String>,
}

impl<R, N> StepBuilder<R, N> {
    /// Start a step targeting `selector`.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            content: None,
            position: None,
            style: None,
            hooks: StepHooks::new(),
            observe: None,
        }
    }

    /// Set fixed or computed content (required).
    pub fn content(mut self, content: impl Into<Content<R>>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set content computed from the navigation context at render time.
    pub fn computed<F>(mut self, f: F) -> Self
    where
        F: Fn(&NavContext) -> R + Send + Sync + 'static,
    {
        self.content = Some(Content::computed(f));
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn style(mut self, style: StyleOverrides) -> Self {
        self.style = Some(style);
        self
    }

    /// Refresh this step in place whenever `selector` mutates.
    pub fn observe(mut self, selector: impl Into<String>) -> Self {
        self.observe = Some(selector.into());
        self
    }

    pub fn pre_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.hooks = self.hooks.pre_action(f);
        self
    }

    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&N>, &NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.hooks = self.hooks.action(f);
        self
    }

    pub fn post_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.hooks = self.hooks.post_action(f);
        self
    }

    pub fn rewind_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&NavContext) -> HookResult + Send + Sync + 'static,
    {
        self.hooks = self.hooks.rewind_action(f);
        self
    }

    /// Build the step.
    pub fn build(self) -> Result<StepDescriptor<R, N>, BuildError> {
        let content = self.content.ok_or(BuildError::MissingContent)?;
        Ok(StepDescriptor {
            selector: self.selector,
            content,
            position: self.position,
            style: self.style,
            hooks: self.hooks,
            observe: self.observe,
        })
    }
}
