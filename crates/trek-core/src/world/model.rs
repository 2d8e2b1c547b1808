use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a location in the world map.
pub type LocationId = u32;

/// A place the player can stand in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique id, referenced by commands, items, and puzzles.
    pub id: LocationId,
    /// Shown on repeat visits.
    pub brief_description: String,
    /// Shown on the first visit and after `look`.
    pub long_description: String,
    /// Command → destination. Commands that stay put map to `id`.
    pub available_commands: BTreeMap<String, LocationId>,
    /// Names of items that can be picked up or won here.
    #[serde(default)]
    pub items: Vec<String>,
    /// Command → flavour text printed without changing state.
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

impl Location {
    /// Destination of `command`, if the command is offered here.
    #[must_use]
    pub fn destination(&self, command: &str) -> Option<LocationId> {
        self.available_commands.get(command).copied()
    }

    /// Every command the player may type here, location-specific ones first.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.available_commands
            .keys()
            .chain(
                self.notes
                    .keys()
                    .filter(|note| !self.available_commands.contains_key(*note)),
            )
            .map(String::as_str)
    }
}

/// Something the player can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    /// Where the item starts out.
    pub start_position: LocationId,
    /// Where the item is meant to be delivered.
    pub target_position: LocationId,
    /// Score awarded while the item is held.
    pub target_points: u32,
}

/// A challenge attached to one command at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Location hosting the puzzle.
    pub loc: LocationId,
    /// Command that starts the puzzle.
    pub command: String,
    /// Question or instructions shown when the puzzle starts.
    #[serde(default)]
    pub prompt: String,
    /// Text shown on success.
    pub win: String,
    /// Text shown on failure.
    pub lose: String,
    /// Extra narration (refusals, farewells).
    #[serde(default)]
    pub dialogue: String,
    /// Where the player ends up after solving the puzzle.
    pub next_loc: LocationId,
    /// Accepted answers, compared after normalisation.
    #[serde(default)]
    pub answer: Vec<String>,
    pub kind: PuzzleKind,
}

impl Puzzle {
    /// True if `input` matches one of the accepted answers.
    ///
    /// Both sides are trimmed, lower-cased, and stripped of `-`, so phone
    /// numbers may be typed with or without separators.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let given = normalize_answer(input);
        self.answer.iter().any(|a| normalize_answer(a) == given)
    }
}

/// How a puzzle behaves once its command is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PuzzleKind {
    /// A correct answer hands over the location's item.
    Reward {
        /// Item that must be held before the puzzle can be attempted.
        #[serde(default)]
        requires: Option<String>,
    },
    /// A correct answer opens the way to `next_loc`.
    Passage,
    /// A few rounds of blackjack; leaving the table moves to `next_loc`.
    Blackjack,
    /// Extra moves, claimable once per playthrough.
    Bonus { moves: u32 },
    /// Hand in the score; wins the game once the target is reached.
    Submit,
}

impl PuzzleKind {
    /// True for kinds that wait for the player's next input.
    #[must_use]
    pub const fn is_prompted(&self) -> bool {
        matches!(self, Self::Reward { .. } | Self::Passage)
    }
}

fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', "")
}
