//! Recorded interaction sessions.
//!
//! A session is a JSON list of host events stamped with their offset from
//! the start of the recording:
//!
//! ```json
//! {"events": [
//!     {"at_ms": 0, "event": {"type": "pointer_down", "x": 680, "y": 250}},
//!     {"at_ms": 16, "event": {"type": "pointer_move", "x": 600, "y": 200}}
//! ]}
//! ```

use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::LiaisonError,
    interaction::{InteractionEvent, Response},
    view::GraphView,
};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since the start of the session.
    #[serde(default)]
    at_ms: u64,
    event: InteractionEvent,
}

impl TimedEvent {
    pub fn new(at_ms: u64, event: InteractionEvent) -> Self {
        Self { at_ms, event }
    }

    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }

    pub fn event(&self) -> &InteractionEvent {
        &self.event
    }
}

/// An ordered list of recorded events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    events: Vec<TimedEvent>,
}

impl Session {
    pub fn new(events: Vec<TimedEvent>) -> Self {
        Self { events }
    }

    /// Parses a session from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LiaisonError::Session`] when the text is not a valid session.
    pub fn from_json(text: &str) -> Result<Self, LiaisonError> {
        serde_json::from_str(text).map_err(LiaisonError::Session)
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Feeds every event to `view` at its recorded time, then lets any
    /// pending redraw fire.
    ///
    /// Returns the view's response to each event, in order.
    pub fn replay(&self, view: &mut GraphView, start: Instant) -> Vec<Response> {
        info!(events = self.events.len(); "Replaying interaction session");

        let mut responses = Vec::with_capacity(self.events.len());
        let mut now = start;
        for timed in &self.events {
            now = start + timed.at();
            view.tick(now);
            let response = view.handle(timed.event(), now);
            debug!(at_ms = timed.at_ms, effects = response.effects().len(); "Replayed event");
            responses.push(response);
        }

        // Flush a redraw scheduled by the last events
        if view.tick(now + view.redraw_delay()) {
            debug!("Pending redraw flushed after replay");
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let session = Session::from_json(
            r#"{"events": [
                {"at_ms": 5, "event": {"type": "wheel", "x": 10, "y": 20, "delta_y": -1}},
                {"event": {"type": "zoom_out"}},
                {"at_ms": 40, "event": {"type": "visibility", "visible": true}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(session.events().len(), 3);
        assert_eq!(session.events()[0].at(), Duration::from_millis(5));
        assert_eq!(
            session.events()[0].event(),
            &InteractionEvent::Wheel {
                x: 10.0,
                y: 20.0,
                delta_y: -1.0
            }
        );
        assert_eq!(session.events()[1].at(), Duration::ZERO);
        assert_eq!(session.events()[1].event(), &InteractionEvent::ZoomOut);
    }

    #[test]
    fn test_unknown_event_rejected() {
        let result = Session::from_json(r#"{"events": [{"event": {"type": "teleport"}}]}"#);
        assert!(matches!(result, Err(LiaisonError::Session(_))));
    }

    #[test]
    fn test_missing_events_is_empty() {
        assert_eq!(Session::from_json("{}").unwrap(), Session::default());
    }
}
