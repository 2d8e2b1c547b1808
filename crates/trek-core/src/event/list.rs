use serde::Serialize;

use super::Event;
use crate::error::ErrorCode;
use crate::world::LocationId;

/// Errors from reading or undoing the turn log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// No event has been recorded yet.
    #[error("{}: no current event; the log is empty", ErrorCode::EmptyLog.code())]
    Empty,

    /// Only the starting event is left; it is never removed.
    #[error("{}: nothing to undo before the first event", ErrorCode::UndoAtStart.code())]
    AtStart,
}

impl LogError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Empty => ErrorCode::EmptyLog,
            Self::AtStart => ErrorCode::UndoAtStart,
        }
    }
}

/// Chronological chain of [`Event`]s for one playthrough.
///
/// The first event is the start of the playthrough and cannot be undone, so
/// once anything has been recorded the list never becomes empty again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventList {
    events: Vec<Event>,
}

impl EventList {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append `event` as the newest turn.
    ///
    /// `command` is stored on the previous newest event as the command that
    /// led here. It is ignored when the log is empty, since there is no
    /// predecessor to annotate.
    pub fn add_event(&mut self, mut event: Event, command: Option<&str>) {
        if let Some(tail) = self.events.last_mut() {
            tail.set_next_command(command.map(str::to_owned));
        }
        event.set_next_command(None);
        tracing::trace!(
            location = event.location_id(),
            ?command,
            len = self.events.len() + 1,
            "event appended"
        );
        self.events.push(event);
    }

    /// Undo the newest turn and return the removed event.
    ///
    /// The new newest event forgets its `next_command`, because the step that
    /// followed it no longer exists. Read [`EventList::last`] afterwards to
    /// find the restored location.
    ///
    /// # Errors
    ///
    /// - [`LogError::Empty`] when nothing has been recorded.
    /// - [`LogError::AtStart`] when only the starting event remains.
    pub fn remove_last_event(&mut self) -> Result<Event, LogError> {
        match self.events.len() {
            0 => Err(LogError::Empty),
            1 => Err(LogError::AtStart),
            _ => {
                let removed = self.events.pop().ok_or(LogError::Empty)?;
                if let Some(tail) = self.events.last_mut() {
                    tail.set_next_command(None);
                }
                tracing::trace!(
                    location = removed.location_id(),
                    len = self.events.len(),
                    "event undone"
                );
                Ok(removed)
            }
        }
    }

    /// Location ids from the first to the newest event, inclusive.
    #[must_use]
    pub fn get_id_log(&self) -> Vec<LocationId> {
        self.events.iter().map(Event::location_id).collect()
    }

    /// Replay the log as display lines, oldest first.
    ///
    /// The iterator is lazy and borrows the list; call again to restart.
    pub fn display_events(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(Event::replay_line)
    }

    /// The oldest event.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Empty`] when nothing has been recorded.
    pub fn first(&self) -> Result<&Event, LogError> {
        self.events.first().ok_or(LogError::Empty)
    }

    /// The newest event, i.e. the player's current position in history.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Empty`] when nothing has been recorded.
    pub fn last(&self) -> Result<&Event, LogError> {
        self.events.last().ok_or(LogError::Empty)
    }

    /// The event at chronological position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// The event recorded just before position `index`.
    #[must_use]
    pub fn previous(&self, index: usize) -> Option<&Event> {
        index.checked_sub(1).and_then(|i| self.events.get(i))
    }

    /// Iterate over events oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Number of recorded events.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventList {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
