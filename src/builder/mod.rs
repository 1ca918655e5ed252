//! Builder API for ergonomic tour construction.
//!
//! This module provides fluent builders and a macro for declaring steps
//! and assembling a [`Tour`](crate::controller::Tour) with its page,
//! renderer, configuration and callbacks.

pub mod error;
pub mod macros;
pub mod step;
pub mod tour;

pub use error::BuildError;
pub use step::StepBuilder;
pub use tour::TourBuilder;
