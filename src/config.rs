//! Tour configuration.

use crate::core::Position;
use serde::{Deserialize, Serialize};

/// Transitions kept in a tour's history unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// What a jump to an earlier step fires on departure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpPolicy {
    /// Jumps are never rewinds: the outgoing step's `postAction` runs.
    #[default]
    AlwaysPostAction,
    /// A jump to a lower index behaves like a rewind and runs the
    /// destination's `rewindAction` instead.
    RewindWhenEarlier,
}

/// Settings of a tour run. Every field has a default, so partial JSON works.
///
/// # Example
///
/// ```rust
/// use tourguide::config::{JumpPolicy, TourConfig};
/// use tourguide::core::Position;
///
/// let config = TourConfig::from_json(r#"{ "start_at": 2, "default_position": "bottom" }"#).unwrap();
///
/// assert_eq!(config.start_at, 2);
/// assert_eq!(config.default_position, Position::Bottom);
/// assert_eq!(config.jump_policy, JumpPolicy::AlwaysPostAction);
/// assert!(config.watch_mutations);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Step activated by [`Tour::open`](crate::controller::Tour::open).
    pub start_at: usize,
    /// Position of steps that don't declare one.
    pub default_position: Position,
    /// Scroll each resolved target into view before measuring it.
    pub scroll_to_target: bool,
    /// Honour `observe` selectors. When off, steps never refresh in place.
    pub watch_mutations: bool,
    pub jump_policy: JumpPolicy,
    /// Keep at most this many transitions in the history. `None` keeps all.
    pub history_limit: Option<usize>,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            start_at: 0,
            default_position: Position::Auto,
            scroll_to_target: true,
            watch_mutations: true,
            jump_policy: JumpPolicy::AlwaysPostAction,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl TourConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
