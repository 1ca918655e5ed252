//! Navigation errors.

use crate::checkpoint::SnapshotError;
use crate::core::RegistryViolation;
use crate::lifecycle::HookFailure;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Errors returned by tour operations.
///
/// Index and state errors reject the command and leave the tour untouched.
/// [`TourError::HookFailed`] is different: the transition did complete and
/// the tour is at its new position; the failures are reported for visibility.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("start index {index} is out of bounds for a tour of {len} steps")]
    InvalidStartIndex { index: usize, len: usize },

    #[error("step index {index} is out of range for a tour of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("the tour is not open")]
    NotOpen,

    #[error("the tour is already open at step {index}")]
    AlreadyOpen { index: usize },

    #[error("step registry is invalid ({} problem(s))", .violations.len())]
    InvalidRegistry {
        violations: NonEmptyVec<RegistryViolation>,
    },

    #[error("{} lifecycle hook(s) failed", .failures.len())]
    HookFailed { failures: NonEmptyVec<HookFailure> },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl TourError {
    /// Whether the command was rejected, leaving state unchanged.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TourError::HookFailed { .. })
    }
}
