//! Turn log for a single playthrough.
//!
//! Every recorded turn is an [`Event`]: the location the player stood in, the
//! description they were shown there, and the command that took them to the
//! next recorded turn. Events are kept by an [`EventList`] in chronological
//! order. The list supports appending a turn, undoing the newest turn, and
//! replaying the whole history.
//!
//! # Layout
//!
//! The chain is stored as a `Vec<Event>` rather than a linked list. The
//! predecessor of the event at index `i` is the event at `i - 1`, the newest
//! event is the last element, and undo is a pop from the tail.
//!
//! ```text
//! index:   0            1            2
//!        [ 7 "go south"][13 "go south"][19 -]
//!          first                       last
//! ```

mod list;

pub use list::{EventList, LogError};

use serde::Serialize;

use crate::world::LocationId;

/// One recorded turn: where the player was, and what they did next.
///
/// The location and description are fixed at construction. `next_command` is
/// owned by the [`EventList`]: it is filled in when a later event is appended
/// and cleared again when that later event is undone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    location_id: LocationId,
    description: String,
    next_command: Option<String>,
}

impl Event {
    /// Create an unlinked event for a visit to `location_id`.
    #[must_use]
    pub fn new(location_id: LocationId, description: impl Into<String>) -> Self {
        Self {
            location_id,
            description: description.into(),
            next_command: None,
        }
    }

    /// The location visited at this step.
    #[must_use]
    pub const fn location_id(&self) -> LocationId {
        self.location_id
    }

    /// The description captured when the location was visited.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The command that led to the following event, if one has been recorded.
    #[must_use]
    pub fn next_command(&self) -> Option<&str> {
        self.next_command.as_deref()
    }

    /// Render this event as a single replay line.
    #[must_use]
    pub fn replay_line(&self) -> String {
        self.next_command.as_ref().map_or_else(
            || self.description.clone(),
            |command| format!("{} | You chose: {command}", self.description),
        )
    }

    pub(crate) fn set_next_command(&mut self, command: Option<String>) {
        self.next_command = command;
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.location_id, self.replay_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_unlinked() {
        let event = Event::new(7, "A quiet dorm room.");
        assert_eq!(event.location_id(), 7);
        assert_eq!(event.description(), "A quiet dorm room.");
        assert!(event.next_command().is_none());
    }

    #[test]
    fn replay_line_without_command_is_description() {
        let event = Event::new(7, "A quiet dorm room.");
        assert_eq!(event.replay_line(), "A quiet dorm room.");
    }

    #[test]
    fn replay_line_includes_command() {
        let mut event = Event::new(7, "A quiet dorm room.");
        event.set_next_command(Some("go south".into()));
        assert_eq!(event.replay_line(), "A quiet dorm room. | You chose: go south");
    }

    #[test]
    fn display_prefixes_location() {
        let event = Event::new(13, "Hallway.");
        assert_eq!(event.to_string(), "[13] Hallway.");
    }
}
