//! Tour position state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the active step was reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
    Jump,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Jump => "jump",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a tour run.
///
/// While `is_open`, `current_index` is always a valid index of the step
/// registry. A closed state carries no meaningful position.
///
/// # Example
///
/// ```rust
/// use tourguide::core::{Direction, TourState};
///
/// let state = TourState::opened_at(2);
/// let state = state.advance(3, Direction::Forward);
///
/// assert!(state.is_open);
/// assert_eq!(state.current_index, 3);
/// assert_eq!(state.last_index, 2);
/// assert_eq!(state.direction, Direction::Forward);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourState {
    pub is_open: bool,
    pub current_index: usize,
    pub direction: Direction,
    pub last_index: usize,
}

impl Default for TourState {
    fn default() -> Self {
        Self::closed()
    }
}

impl TourState {
    pub fn closed() -> Self {
        Self {
            is_open: false,
            current_index: 0,
            direction: Direction::Forward,
            last_index: 0,
        }
    }

    /// Fresh state of a tour opened at `index`. Nothing was departed yet, so
    /// the last index equals the current one.
    pub fn opened_at(index: usize) -> Self {
        Self {
            is_open: true,
            current_index: index,
            direction: Direction::Forward,
            last_index: index,
        }
    }

    /// Move to `to`, remembering where we came from.
    pub fn advance(self, to: usize, direction: Direction) -> Self {
        Self {
            is_open: self.is_open,
            current_index: to,
            direction,
            last_index: self.current_index,
        }
    }

    /// The active index, or `None` while closed.
    pub fn position(&self) -> Option<usize> {
        self.is_open.then_some(self.current_index)
    }
}
