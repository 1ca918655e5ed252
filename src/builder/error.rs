//! Build errors for tour and step builders.

use crate::core::RegistryViolation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Errors that can occur when building tours and steps.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Page not specified. Call .page(page) before .build()")]
    MissingPage,

    #[error("Step content not specified. Call .content(..) or .computed(..)")]
    MissingContent,

    #[error("Start step {index} is out of bounds for {len} steps")]
    InvalidStartIndex { index: usize, len: usize },

    #[error("Step registry is invalid ({} problem(s))", .0.len())]
    InvalidRegistry(NonEmptyVec<RegistryViolation>),
}
