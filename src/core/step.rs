//! Step descriptors: what a single stop of the tour points at and shows.

use crate::controller::NavContext;
use crate::lifecycle::StepHooks;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Preferred side of the target for the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Bottom,
    Left,
    Right,
    Center,
    /// Let the renderer pick the side with the most room.
    #[default]
    Auto,
}

/// Free-form style overrides handed through to the renderer untouched.
///
/// Keys and values are opaque to the engine; a renderer decides what
/// `background-color` or `color` mean for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleOverrides(BTreeMap<String, String>);

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a single property, returning the updated overrides.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Function producing content from the navigation context of the step.
pub type ContentFn<R> = Arc<dyn Fn(&NavContext) -> R + Send + Sync>;

/// Displayable content of a step.
///
/// Content is either a fixed value or a function of the navigation context,
/// which lets it embed controls such as "go back to step 2". Computed
/// content is evaluated every time the step is rendered, never ahead of time.
///
/// # Example
///
/// ```rust
/// use tourguide::core::Content;
///
/// let fixed: Content<String> = Content::Static("And this is our cool bus".to_string());
/// let computed: Content<String> =
///     Content::computed(|ctx| format!("Step {} of {}", ctx.index + 1, ctx.total));
///
/// assert!(!fixed.is_computed());
/// assert!(computed.is_computed());
/// ```
pub enum Content<R> {
    Static(R),
    Computed(ContentFn<R>),
}

impl<R> Content<R> {
    /// Wrap a closure as computed content.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&NavContext) -> R + Send + Sync + 'static,
    {
        Content::Computed(Arc::new(f))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Content::Computed(_))
    }
}

impl<R: Clone> Content<R> {
    /// Produce the renderable for the given context.
    pub fn resolve(&self, ctx: &NavContext) -> R {
        match self {
            Content::Static(value) => value.clone(),
            Content::Computed(f) => f(ctx),
        }
    }
}

impl<R: Clone> Clone for Content<R> {
    fn clone(&self) -> Self {
        match self {
            Content::Static(value) => Content::Static(value.clone()),
            Content::Computed(f) => Content::Computed(Arc::clone(f)),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Content<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Content::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<R> From<R> for Content<R> {
    fn from(value: R) -> Self {
        Content::Static(value)
    }
}

/// One stop of the tour.
///
/// `R` is the renderable content type, `N` the page node type handed to the
/// `action` hook once the target is resolved.
pub struct StepDescriptor<R, N> {
    /// Selector of the element to highlight.
    pub selector: String,
    pub content: Content<R>,
    /// Falls back to the tour's default position when unset.
    pub position: Option<Position>,
    pub style: Option<StyleOverrides>,
    pub hooks: StepHooks<N>,
    /// Selector of an element to watch for mutations while this step is active.
    pub observe: Option<String>,
}

impl<R, N> StepDescriptor<R, N> {
    pub fn new(selector: impl Into<String>, content: Content<R>) -> Self {
        Self {
            selector: selector.into(),
            content,
            position: None,
            style: None,
            hooks: StepHooks::default(),
            observe: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_style(mut self, style: StyleOverrides) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_hooks(mut self, hooks: StepHooks<N>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn observing(mut self, selector: impl Into<String>) -> Self {
        self.observe = Some(selector.into());
        self
    }
}

impl<R: Clone, N> Clone for StepDescriptor<R, N> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            content: self.content.clone(),
            position: self.position,
            style: self.style.clone(),
            hooks: self.hooks.clone(),
            observe: self.observe.clone(),
        }
    }
}

impl<R: fmt::Debug, N> fmt::Debug for StepDescriptor<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("selector", &self.selector)
            .field("content", &self.content)
            .field("position", &self.position)
            .field("style", &self.style)
            .field("hooks", &self.hooks)
            .field("observe", &self.observe)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::NavHandle;
    use crate::core::Direction;

    fn context(index: usize, total: usize) -> NavContext {
        let (nav, _inbox) = NavHandle::channel();
        NavContext::new(index, total, Direction::Forward, nav)
    }

    #[test]
    fn static_content_resolves_to_its_value() {
        let content: Content<String> = Content::Static("hello".to_string());
        assert_eq!(content.resolve(&context(0, 3)), "hello");
    }

    #[test]
    fn computed_content_sees_navigation_context() {
        let content: Content<String> =
            Content::computed(|ctx| format!("{}/{}", ctx.index + 1, ctx.total));

        assert_eq!(content.resolve(&context(1, 4)), "2/4");
        assert_eq!(content.resolve(&context(3, 4)), "4/4");
    }

    #[test]
    fn position_serializes_lowercase() {
        let json = serde_json::to_string(&Position::Left).unwrap();
        assert_eq!(json, "\"left\"");

        let parsed: Position = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(parsed, Position::Auto);
    }

    #[test]
    fn style_overrides_replace_existing_keys() {
        let style = StyleOverrides::new()
            .set("backgroundColor", "black")
            .set("color", "white")
            .set("color", "red");

        assert_eq!(style.len(), 2);
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("missing"), None);
    }

    #[test]
    fn descriptor_builders_set_optional_fields() {
        let step: StepDescriptor<String, ()> =
            StepDescriptor::new("[data-tut=\"state\"]", Content::Static("s".to_string()))
                .with_position(Position::Left)
                .observing("[data-tut=\"state--observe\"]");

        assert_eq!(step.position, Some(Position::Left));
        assert_eq!(step.observe.as_deref(), Some("[data-tut=\"state--observe\"]"));
        assert!(step.style.is_none());
    }
}
