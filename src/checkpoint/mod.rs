//! Checkpoint and resume for tour runs.
//!
//! A snapshot captures the position and history of a running tour so it can
//! be reopened where the user left off, for example after a page reload.
//! Step descriptors are NOT included (hooks and computed content are not
//! serializable); the snapshot is checked against the registry it resumes.

use crate::core::{TourHistory, TourState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable checkpoint of a tour run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Registry length at capture time
    pub total_steps: usize,

    pub state: TourState,

    pub history: TourHistory,
}

impl TourSnapshot {
    pub fn capture(state: TourState, history: TourHistory, total_steps: usize) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            total_steps,
            state,
            history,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }

    /// Index to reopen at, given the length of the registry being resumed.
    pub fn resume_index(&self, total_steps: usize) -> Result<usize, SnapshotError> {
        if !self.state.is_open {
            return Err(SnapshotError::NotResumable);
        }
        if self.total_steps != total_steps || self.state.current_index >= total_steps {
            return Err(SnapshotError::StepCountMismatch {
                expected: total_steps,
                found: self.total_steps,
            });
        }
        Ok(self.state.current_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, StepTransition};

    fn running_snapshot() -> TourSnapshot {
        let history = TourHistory::new().record(StepTransition {
            from: 0,
            to: 3,
            direction: Direction::Jump,
            timestamp: Utc::now(),
        });
        let state = TourState::opened_at(0).advance(3, Direction::Jump);
        TourSnapshot::capture(state, history, 5)
    }

    #[test]
    fn json_roundtrip_preserves_snapshot() {
        let snapshot = running_snapshot();
        let json = snapshot.to_json().unwrap();
        assert_eq!(TourSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn binary_roundtrip_preserves_snapshot() {
        let snapshot = running_snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(TourSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn future_versions_are_rejected() {
        let mut snapshot = running_snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();

        let result = TourSnapshot::from_json(&json);

        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn garbage_is_a_deserialization_error() {
        assert!(matches!(
            TourSnapshot::from_json("{ not json"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
        assert!(matches!(
            TourSnapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn resume_index_validates_against_registry() {
        let snapshot = running_snapshot();

        assert_eq!(snapshot.resume_index(5).unwrap(), 3);
        assert!(matches!(
            snapshot.resume_index(4),
            Err(SnapshotError::StepCountMismatch { expected: 4, found: 5 })
        ));

        let closed = TourSnapshot::capture(TourState::closed(), TourHistory::new(), 5);
        assert!(matches!(closed.resume_index(5), Err(SnapshotError::NotResumable)));
    }

    #[test]
    fn snapshots_get_distinct_ids() {
        assert_ne!(running_snapshot().id, running_snapshot().id);
    }
}
