//! Static world data: locations, items, and puzzles.
//!
//! Worlds are authored as JSON with three top-level arrays:
//!
//! ```text
//! { "locations": [...], "items": [...], "puzzles": [...] }
//! ```
//!
//! Loading validates every cross-reference up front, so the session can trust
//! that command destinations, item names, and puzzle targets all resolve.

mod model;

pub use model::{Item, Location, LocationId, Puzzle, PuzzleKind};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// The campus map shipped with trek.
const BUILTIN_WORLD: &str = include_str!("../../data/campus.json");

/// Errors from loading or validating world data.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("{}: failed to read {}: {source}", ErrorCode::WorldReadFailed.code(), path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid world data: {0}", ErrorCode::WorldParseError.code())]
    Parse(#[from] serde_json::Error),

    #[error("{}: location {id} is defined more than once", ErrorCode::DuplicateLocation.code())]
    DuplicateLocation { id: LocationId },

    #[error("{}: {context} refers to unknown location {id}", ErrorCode::UnknownLocation.code())]
    UnknownLocation { id: LocationId, context: String },

    #[error("{}: {context} refers to unknown item '{name}'", ErrorCode::UnknownItem.code())]
    UnknownItem { name: String, context: String },

    #[error(
        "{}: puzzle '{command}' at location {loc} waits for an answer but accepts none",
        ErrorCode::UnanswerablePuzzle.code()
    )]
    Unanswerable { command: String, loc: LocationId },

    #[error(
        "{}: command '{command}' at location {loc} is not lower case; input is lower-cased before matching",
        ErrorCode::UnreachableCommand.code()
    )]
    NotLowercase { command: String, loc: LocationId },

    #[error(
        "{}: puzzle '{command}' is not offered by location {loc}",
        ErrorCode::UnreachablePuzzle.code()
    )]
    UnreachablePuzzle { command: String, loc: LocationId },
}

impl WorldError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::WorldReadFailed,
            Self::Parse(_) => ErrorCode::WorldParseError,
            Self::DuplicateLocation { .. } => ErrorCode::DuplicateLocation,
            Self::UnknownLocation { .. } => ErrorCode::UnknownLocation,
            Self::UnknownItem { .. } => ErrorCode::UnknownItem,
            Self::Unanswerable { .. } => ErrorCode::UnanswerablePuzzle,
            Self::NotLowercase { .. } => ErrorCode::UnreachableCommand,
            Self::UnreachablePuzzle { .. } => ErrorCode::UnreachablePuzzle,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WorldData {
    locations: Vec<Location>,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    puzzles: Vec<Puzzle>,
}

/// A validated game world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    locations: BTreeMap<LocationId, Location>,
    items: BTreeMap<String, Item>,
    puzzles: Vec<Puzzle>,
}

impl World {
    /// Parse and validate a world from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] for malformed JSON and the other
    /// variants for dangling references.
    pub fn from_json_str(json: &str) -> Result<Self, WorldError> {
        let data: WorldData = serde_json::from_str(json)?;

        let mut locations = BTreeMap::new();
        for location in data.locations {
            let id = location.id;
            if locations.insert(id, location).is_some() {
                return Err(WorldError::DuplicateLocation { id });
            }
        }

        let items = data
            .items
            .into_iter()
            .map(|item| (item.name.clone(), item))
            .collect();

        let world = Self {
            locations,
            items,
            puzzles: data.puzzles,
        };
        world.validate()?;

        tracing::debug!(
            locations = world.locations.len(),
            items = world.items.len(),
            puzzles = world.puzzles.len(),
            "world loaded"
        );
        Ok(world)
    }

    /// Read, parse, and validate a world file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Io`] if the file cannot be read, otherwise as
    /// [`World::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The bundled campus world.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data itself is broken.
    pub fn builtin() -> Result<Self, WorldError> {
        Self::from_json_str(BUILTIN_WORLD)
    }

    /// Check that every id and item name in the world resolves and that every
    /// command and puzzle can actually be typed by the player.
    ///
    /// # Errors
    ///
    /// Returns the first dangling reference or unreachable command found.
    pub fn validate(&self) -> Result<(), WorldError> {
        for location in self.locations.values() {
            let mut keys = location.available_commands.keys().chain(location.notes.keys());
            if let Some(command) = keys.find(|k| k.chars().any(char::is_uppercase)) {
                return Err(WorldError::NotLowercase {
                    command: command.clone(),
                    loc: location.id,
                });
            }
            for (command, destination) in &location.available_commands {
                self.expect_location(
                    *destination,
                    || format!("command '{command}' at location {}", location.id),
                )?;
            }
            for name in &location.items {
                self.expect_item(name, || format!("location {}", location.id))?;
            }
        }

        for item in self.items.values() {
            self.expect_location(item.start_position, || {
                format!("start position of '{}'", item.name)
            })?;
            self.expect_location(item.target_position, || {
                format!("target position of '{}'", item.name)
            })?;
        }

        for puzzle in &self.puzzles {
            let context = || format!("puzzle '{}'", puzzle.command);
            self.expect_location(puzzle.loc, context)?;
            self.expect_location(puzzle.next_loc, context)?;
            if self
                .location(puzzle.loc)
                .and_then(|location| location.destination(&puzzle.command))
                .is_none()
            {
                return Err(WorldError::UnreachablePuzzle {
                    command: puzzle.command.clone(),
                    loc: puzzle.loc,
                });
            }
            if let PuzzleKind::Reward {
                requires: Some(name),
            } = &puzzle.kind
            {
                self.expect_item(name, context)?;
            }
            if puzzle.kind.is_prompted() && puzzle.answer.is_empty() {
                return Err(WorldError::Unanswerable {
                    command: puzzle.command.clone(),
                    loc: puzzle.loc,
                });
            }
        }

        Ok(())
    }

    fn expect_location(
        &self,
        id: LocationId,
        context: impl FnOnce() -> String,
    ) -> Result<(), WorldError> {
        if self.locations.contains_key(&id) {
            Ok(())
        } else {
            Err(WorldError::UnknownLocation {
                id,
                context: context(),
            })
        }
    }

    fn expect_item(&self, name: &str, context: impl FnOnce() -> String) -> Result<(), WorldError> {
        if self.items.contains_key(name) {
            Ok(())
        } else {
            Err(WorldError::UnknownItem {
                name: name.to_string(),
                context: context(),
            })
        }
    }

    /// Look up a location by id.
    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Look up an item by name.
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// The puzzle started by `command` at location `loc`, if any.
    #[must_use]
    pub fn puzzle(&self, loc: LocationId, command: &str) -> Option<&Puzzle> {
        self.puzzles
            .iter()
            .find(|p| p.loc == loc && p.command == command)
    }

    /// All locations ordered by id.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All items ordered by name.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// All puzzles in file order.
    #[must_use]
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }
}
