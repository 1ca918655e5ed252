//! Core tour data model.
//!
//! This module contains the plain data the engine works on:
//! - Step descriptors and their lazily resolved content
//! - The ordered step registry and its validation
//! - Tour position state and transition history
//!
//! Nothing in here touches the page or fires hooks; that is the job of
//! the [`controller`](crate::controller).

mod history;
mod registry;
mod state;
mod step;

pub use history::{StepTransition, TourHistory};
pub use registry::{RegistryViolation, StepRegistry};
pub use state::{Direction, TourState};
pub use step::{Content, ContentFn, Position, StepDescriptor, StyleOverrides};
