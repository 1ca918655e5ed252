//! Builder for constructing tours.

use crate::builder::error::BuildError;
use crate::config::{JumpPolicy, TourConfig};
use crate::controller::{NoopRenderer, Renderer, Tour, TourCallbacks};
use crate::core::{Position, StepDescriptor, StepRegistry};
use crate::page::MutationSource;
use stillwater::validation::Validation;

/// Builder for constructing tours with a fluent API.
pub struct TourBuilder<R, P: MutationSource> {
    steps: Vec<StepDescriptor<R, P::Node>>,
    page: Option<P>,
    renderer: Option<Box<dyn Renderer<R, P::Node>>>,
    config: TourConfig,
    callbacks: TourCallbacks,
}

impl<R: Clone, P: MutationSource> TourBuilder<R, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            page: None,
            renderer: None,
            config: TourConfig::default(),
            callbacks: TourCallbacks::default(),
        }
    }

    /// Append a step.
    pub fn step(mut self, step: StepDescriptor<R, P::Node>) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps at once.
    pub fn steps(mut self, steps: impl IntoIterator<Item = StepDescriptor<R, P::Node>>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Set the page (required).
    pub fn page(mut self, page: P) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the renderer. Defaults to one that draws nothing.
    pub fn renderer<T>(mut self, renderer: T) -> Self
    where
        T: Renderer<R, P::Node> + 'static,
    {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TourConfig) -> Self {
        self.config = config;
        self
    }

    pub fn start_at(mut self, index: usize) -> Self {
        self.config.start_at = index;
        self
    }

    pub fn default_position(mut self, position: Position) -> Self {
        self.config.default_position = position;
        self
    }

    pub fn jump_policy(mut self, policy: JumpPolicy) -> Self {
        self.config.jump_policy = policy;
        self
    }

    pub fn on_after_open<F: FnMut(usize) + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_after_open = Some(Box::new(f));
        self
    }

    pub fn on_before_close<F: FnMut(usize) + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_before_close = Some(Box::new(f));
        self
    }

    pub fn on_step_change<F: FnMut(usize) + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_step_change = Some(Box::new(f));
        self
    }

    /// Build the tour, closed.
    /// Returns an error if the page is missing or the steps are invalid.
    pub fn build(self) -> Result<Tour<R, P>, BuildError> {
        let page = self.page.ok_or(BuildError::MissingPage)?;
        let registry = StepRegistry::new(self.steps);

        if let Validation::Failure(violations) = registry.validate() {
            return Err(BuildError::InvalidRegistry(violations));
        }
        if self.config.start_at >= registry.len() {
            return Err(BuildError::InvalidStartIndex {
                index: self.config.start_at,
                len: registry.len(),
            });
        }

        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(NoopRenderer) as Box<dyn Renderer<R, P::Node>>);
        Ok(Tour::from_parts(
            registry,
            page,
            renderer,
            self.config,
            self.callbacks,
        ))
    }
}

impl<R: Clone, P: MutationSource> Default for TourBuilder<R, P> {
    fn default() -> Self {
        Self::new()
    }
}
