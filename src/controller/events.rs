//! Events reported to the caller.

use crate::core::Direction;
use serde::{Deserialize, Serialize};

/// Something the caller may want to know about, drained with
/// [`Tour::drain_events`](super::Tour::drain_events).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TourEvent {
    Opened {
        index: usize,
        total: usize,
    },
    StepChanged {
        from: usize,
        to: usize,
        direction: Direction,
    },
    /// The step's selector matched nothing; the overlay was centred instead.
    TargetNotFound {
        index: usize,
        selector: String,
    },
    /// The active step was re-rendered in place after a mutation.
    Refreshed {
        index: usize,
    },
    Closed {
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let event = TourEvent::TargetNotFound {
            index: 7,
            selector: "[data-tut=\"scroll--hidden\"]".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "target_not_found");
        assert_eq!(json["index"], 7);
    }
}
