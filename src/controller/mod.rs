//! Tour orchestration.
//!
//! [`Tour`] owns the step registry, the page and the renderer, and turns
//! navigation commands into hook calls, target lookups and frames.
//! Navigation from inside content, hooks or the renderer goes through a
//! [`NavHandle`] and is applied by [`Tour::pump`].

mod error;
mod events;
mod nav;
mod render;
mod tour;

pub use error::TourError;
pub use events::TourEvent;
pub use nav::{NavContext, NavHandle, Request};
pub use render::{Frame, NoopRenderer, Placement, Renderer};
pub use tour::{PumpReport, Tour, TourCallback, TourCallbacks};
