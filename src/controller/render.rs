//! Render boundary.
//!
//! The engine does not draw. It hands a [`Frame`] to a [`Renderer`], which
//! may be the default one or a custom helper swapped in at runtime.

use super::nav::NavHandle;
use crate::core::{Direction, Position, StyleOverrides};
use crate::page::Rect;

/// Where the overlay should go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Next to the measured target.
    Anchored { rect: Rect, position: Position },
    /// Target missing: centred in the viewport.
    Centered,
}

/// Everything a renderer needs for one paint of the active step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<R, N> {
    pub index: usize,
    pub total: usize,
    pub direction: Direction,
    pub content: R,
    pub placement: Placement,
    /// Resolved target node, if it was found.
    pub target: Option<N>,
    pub style: Option<StyleOverrides>,
    /// `true` for in-place refreshes (mutations, renderer swaps), `false`
    /// for the first paint after a transition.
    pub refresh: bool,
}

/// Draws frames. `nav` lets a custom helper offer `gotoStep` and `close`.
pub trait Renderer<R, N> {
    fn render(&mut self, frame: &Frame<R, N>, nav: &NavHandle);

    /// The tour closed; remove the overlay.
    fn clear(&mut self) {}
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRenderer;

impl<R, N> Renderer<R, N> for NoopRenderer {
    fn render(&mut self, _frame: &Frame<R, N>, _nav: &NavHandle) {}
}
