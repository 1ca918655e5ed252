//! Step transition history tracking.
//!
//! Provides immutable tracking of the transitions a tour run went through,
//! useful for diagnostics and for resuming a tour from a snapshot.

use super::state::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single move between steps.
///
/// # Example
///
/// ```rust
/// use tourguide::core::{Direction, StepTransition};
/// use chrono::Utc;
///
/// let transition = StepTransition {
///     from: 0,
///     to: 1,
///     direction: Direction::Forward,
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_wrap(5));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepTransition {
    /// Index departed from
    pub from: usize,
    /// Index arrived at
    pub to: usize,
    pub direction: Direction,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl StepTransition {
    /// Whether this transition wrapped around either end of a tour of `len` steps.
    pub fn is_wrap(&self, len: usize) -> bool {
        match self.direction {
            Direction::Forward => len > 0 && self.from == len - 1 && self.to == 0,
            Direction::Backward => len > 0 && self.from == 0 && self.to == len - 1,
            Direction::Jump => false,
        }
    }
}

/// Ordered history of step transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added. An optional limit keeps only the most recent entries.
///
/// # Example
///
/// ```rust
/// use tourguide::core::{Direction, StepTransition, TourHistory};
/// use chrono::Utc;
///
/// let history = TourHistory::new()
///     .record(StepTransition { from: 0, to: 1, direction: Direction::Forward, timestamp: Utc::now() })
///     .record(StepTransition { from: 1, to: 4, direction: Direction::Jump, timestamp: Utc::now() });
///
/// assert_eq!(history.get_path(), vec![0, 1, 4]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TourHistory {
    transitions: Vec<StepTransition>,
    limit: Option<usize>,
}

impl TourHistory {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` transitions.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            transitions: Vec::new(),
            limit,
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// When a limit is set, the oldest transitions are dropped first.
    pub fn record(&self, transition: StepTransition) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    /// Record a transition in place.
    pub fn push(&mut self, transition: StepTransition) {
        self.transitions.push(transition);
        self.trim();
    }

    /// The same transitions under a new limit, keeping the most recent.
    pub fn limited_to(&self, limit: Option<usize>) -> Self {
        let mut next = Self {
            transitions: self.transitions.clone(),
            limit,
        };
        next.trim();
        next
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            let excess = self.transitions.len().saturating_sub(limit);
            self.transitions.drain(..excess);
        }
    }

    /// Indices visited, in order: the first `from`, then each `to`.
    pub fn get_path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StepTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StepTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: usize, to: usize, direction: Direction) -> StepTransition {
        StepTransition {
            from,
            to,
            direction,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = TourHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = TourHistory::new();
        let new_history = history.record(transition(0, 1, Direction::Forward));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_index_sequence() {
        let history = TourHistory::new()
            .record(transition(0, 1, Direction::Forward))
            .record(transition(1, 2, Direction::Forward))
            .record(transition(2, 1, Direction::Backward));

        assert_eq!(history.get_path(), vec![0, 1, 2, 1]);
        assert_eq!(history.last().map(|t| t.direction), Some(Direction::Backward));
    }

    #[test]
    fn limit_keeps_most_recent_transitions() {
        let mut history = TourHistory::with_limit(Some(2));
        for i in 0..5 {
            history = history.record(transition(i, i + 1, Direction::Forward));
        }

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec![3, 4, 5]);
    }

    #[test]
    fn push_respects_limit() {
        let mut history = TourHistory::with_limit(Some(1));
        history.push(transition(0, 1, Direction::Forward));
        history.push(transition(1, 0, Direction::Backward));

        assert_eq!(history.get_path(), vec![1, 0]);
    }

    #[test]
    fn limited_to_keeps_most_recent_under_new_limit() {
        let mut history = TourHistory::new();
        for i in 0..6 {
            history.push(transition(i, i + 1, Direction::Forward));
        }

        let bounded = history.limited_to(Some(2));

        assert_eq!(bounded.limit(), Some(2));
        assert_eq!(bounded.get_path(), vec![4, 5, 6]);
        assert_eq!(history.len(), 6);
        assert_eq!(bounded.limited_to(None).len(), 2);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = TourHistory::new()
            .record(StepTransition {
                from: 0,
                to: 1,
                direction: Direction::Forward,
                timestamp: start,
            })
            .record(StepTransition {
                from: 1,
                to: 2,
                direction: Direction::Forward,
                timestamp: start + chrono::Duration::milliseconds(250),
            });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn wrap_detection() {
        assert!(transition(2, 0, Direction::Forward).is_wrap(3));
        assert!(transition(0, 2, Direction::Backward).is_wrap(3));
        assert!(!transition(2, 0, Direction::Jump).is_wrap(3));
        assert!(!transition(0, 1, Direction::Forward).is_wrap(3));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = TourHistory::with_limit(Some(10)).record(transition(0, 3, Direction::Jump));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TourHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
