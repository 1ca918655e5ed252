//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur when saving or restoring a tour snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot was taken against a registry of a different length
    #[error("Snapshot covers {found} steps but the tour has {expected}")]
    StepCountMismatch { expected: usize, found: usize },

    /// Snapshot of a closed tour has no position to resume
    #[error("Snapshot was taken of a closed tour")]
    NotResumable,
}
