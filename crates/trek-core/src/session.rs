//! One playthrough: rules, player state, and the turn log.
//!
//! A [`GameSession`] borrows a validated [`World`] and turns raw player input
//! into [`Turn`]s. Every recorded turn pushes an [`Event`] onto the session's
//! [`EventList`] together with a snapshot of the player state at that point,
//! so `undo` can restore inventory, moves, and bonus claims exactly.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blackjack::{Blackjack, Step};
use crate::error::ErrorCode;
use crate::event::{Event, EventList, LogError};
use crate::rng::DeterministicRng;
use crate::world::{Location, LocationId, Puzzle, PuzzleKind, World, WorldError};

/// Commands accepted at every location.
pub const MENU: [&str; 6] = ["look", "inventory", "score", "undo", "log", "quit"];

const PICKUP_PREFIX: &str = "pickup ";

// ---------------------------------------------------------------------------
// Rules and status
// ---------------------------------------------------------------------------

/// Tunable limits for a playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Moves available at the start.
    pub max_moves: u32,
    /// Score needed for `submit` to win.
    pub win_score: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_moves: 25,
            win_score: 20,
        }
    }
}

/// Where the playthrough stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Playing,
    Won,
    Lost,
    Quit,
}

impl Status {
    /// True once no further input is accepted.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Quit => "quit",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from applying player input.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{}: the game is over ({0})", ErrorCode::GameFinished.code())]
    Finished(Status),

    #[error(
        "{}: '{command}' is not available at location {location}",
        ErrorCode::UnknownCommand.code()
    )]
    UnknownCommand {
        command: String,
        location: LocationId,
    },

    #[error(transparent)]
    Log(#[from] LogError),

    #[error(transparent)]
    World(#[from] WorldError),
}

impl SessionError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Finished(_) => ErrorCode::GameFinished,
            Self::UnknownCommand { .. } => ErrorCode::UnknownCommand,
            Self::Log(err) => err.code(),
            Self::World(err) => err.code(),
        }
    }
}

// ---------------------------------------------------------------------------
// Turn results
// ---------------------------------------------------------------------------

/// What happened in response to one line of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Narration for the player, in order.
    pub messages: Vec<String>,
    /// True if an event was added to the log.
    pub recorded: bool,
    /// Status after the turn.
    pub status: Status,
}

/// Player state captured alongside each event.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TurnState {
    inventory: Vec<String>,
    moves_remaining: u32,
    bonus_claimed: bool,
}

/// Interaction waiting on the next input.
#[derive(Debug, Clone)]
enum Pending<'w> {
    Answer(&'w Puzzle),
    Table { puzzle: &'w Puzzle, game: Blackjack },
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single playthrough over a borrowed world.
#[derive(Debug, Clone)]
pub struct GameSession<'w> {
    world: &'w World,
    rules: Rules,
    log: EventList,
    /// One entry per event in `log`.
    snapshots: Vec<TurnState>,
    state: TurnState,
    current: LocationId,
    visited: BTreeSet<LocationId>,
    pending: Option<Pending<'w>>,
    status: Status,
    rng: DeterministicRng,
}

impl<'w> GameSession<'w> {
    /// Start a playthrough at `start` and record the start event.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::World`] if `start` is not a location.
    pub fn new(
        world: &'w World,
        rules: Rules,
        start: LocationId,
        rng: DeterministicRng,
    ) -> Result<Self, SessionError> {
        let location = world
            .location(start)
            .ok_or_else(|| WorldError::UnknownLocation {
                id: start,
                context: "start location".to_string(),
            })?;

        let state = TurnState {
            inventory: Vec::new(),
            moves_remaining: rules.max_moves,
            bonus_claimed: false,
        };
        let mut log = EventList::new();
        log.add_event(Event::new(start, location.long_description.clone()), None);

        tracing::debug!(start, max_moves = rules.max_moves, "session started");
        Ok(Self {
            world,
            rules,
            log,
            snapshots: vec![state.clone()],
            state,
            current: start,
            visited: BTreeSet::new(),
            pending: None,
            status: Status::Playing,
            rng,
        })
    }

    #[must_use]
    pub const fn world(&self) -> &'w World {
        self.world
    }

    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// The turn log recorded so far.
    #[must_use]
    pub const fn log(&self) -> &EventList {
        &self.log
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn current_location(&self) -> LocationId {
        self.current
    }

    #[must_use]
    pub const fn moves_remaining(&self) -> u32 {
        self.state.moves_remaining
    }

    /// Names of held items, in pickup order.
    #[must_use]
    pub fn inventory(&self) -> &[String] {
        &self.state.inventory
    }

    #[must_use]
    pub const fn bonus_claimed(&self) -> bool {
        self.state.bonus_claimed
    }

    /// Sum of `target_points` over held items.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.state
            .inventory
            .iter()
            .filter_map(|name| self.world.item(name))
            .map(|item| item.target_points)
            .sum()
    }

    /// Input prompt for the pending interaction, if one is waiting.
    #[must_use]
    pub fn pending_prompt(&self) -> Option<&'w str> {
        match self.pending.as_ref()? {
            Pending::Answer(puzzle) => Some(puzzle.prompt.as_str()),
            Pending::Table { .. } => Some("hit / stand / y / n: "),
        }
    }

    /// Describe the current location and mark it visited.
    ///
    /// The long description is used on the first visit and after `look`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::World`] if the current location vanished from
    /// the world, which validation rules out.
    pub fn scene(&mut self) -> Result<Vec<String>, SessionError> {
        let location = self.here()?;
        let first_visit = self.visited.insert(self.current);
        let description = if first_visit {
            &location.long_description
        } else {
            &location.brief_description
        };

        let mut lines = vec![
            description.clone(),
            format!("What to do? Choose from: {}", MENU.join(", ")),
            "At this location, you can also:".to_string(),
        ];
        lines.extend(location.commands().map(|c| format!("- {c}")));
        Ok(lines)
    }

    /// Apply one line of player input.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Finished`] once the game has ended.
    /// - [`SessionError::UnknownCommand`] for input that is neither a menu
    ///   command nor offered at the current location. Nothing changes.
    pub fn apply(&mut self, raw: &str) -> Result<Turn, SessionError> {
        if self.status.is_over() {
            return Err(SessionError::Finished(self.status));
        }
        let input = raw.trim().to_lowercase();
        let before = self.log.len();

        let mut messages = match self.pending.take() {
            Some(Pending::Answer(puzzle)) => self.answer(puzzle, &input)?,
            Some(Pending::Table { puzzle, game }) => self.table(puzzle, game, &input)?,
            None => self.dispatch(&input)?,
        };

        if self.status == Status::Playing && self.state.moves_remaining == 0 {
            self.status = Status::Lost;
            self.pending = None;
            messages.push("You ran out of moves. You lose :(".to_string());
        }

        let recorded = self.log.len() > before;
        tracing::debug!(
            command = %input,
            location = self.current,
            recorded,
            moves = self.state.moves_remaining,
            status = %self.status,
            "turn applied"
        );
        Ok(Turn {
            messages,
            recorded,
            status: self.status,
        })
    }

    fn dispatch(&mut self, input: &str) -> Result<Vec<String>, SessionError> {
        if MENU.contains(&input) {
            return self.menu(input);
        }

        let location = self.here()?;
        let mut messages = Vec::new();
        if let Some(note) = location.notes.get(input) {
            messages.push(note.clone());
        }
        let Some(destination) = location.destination(input) else {
            if messages.is_empty() {
                return Err(SessionError::UnknownCommand {
                    command: input.to_string(),
                    location: self.current,
                });
            }
            return Ok(messages);
        };

        if let Some(puzzle) = self.world.puzzle(self.current, input) {
            messages.extend(self.start_puzzle(puzzle, input, destination)?);
        } else if let Some(name) = input.strip_prefix(PICKUP_PREFIX) {
            messages.extend(self.pickup(location, name, input, destination)?);
        } else {
            self.record(destination, input, true)?;
        }
        Ok(messages)
    }

    fn menu(&mut self, input: &str) -> Result<Vec<String>, SessionError> {
        let messages = match input {
            "look" => {
                self.visited.remove(&self.current);
                Vec::new()
            }
            "inventory" => {
                if self.state.inventory.is_empty() {
                    vec!["You have no items in your inventory.".to_string()]
                } else {
                    self.state
                        .inventory
                        .iter()
                        .filter_map(|name| self.world.item(name))
                        .map(|item| format!("- {}: {}", item.name, item.description))
                        .collect()
                }
            }
            "score" => vec![format!(
                "You currently have {}/{} points.",
                self.score(),
                self.rules.win_score
            )],
            "undo" => self.undo()?,
            "log" => self.log.display_events().collect(),
            "quit" => {
                self.status = Status::Quit;
                vec!["Goodbye.".to_string()]
            }
            _ => Vec::new(),
        };
        Ok(messages)
    }

    fn undo(&mut self) -> Result<Vec<String>, SessionError> {
        match self.log.remove_last_event() {
            Ok(removed) => {
                self.snapshots.pop();
                self.state = self.snapshots.last().cloned().ok_or(LogError::Empty)?;
                self.current = self.log.last()?.location_id();
                tracing::debug!(
                    undone = removed.location_id(),
                    restored = self.current,
                    "undo"
                );
                let brief = &self.here()?.brief_description;
                Ok(vec![format!("Undone. You are back at: {brief}")])
            }
            Err(LogError::AtStart) => Ok(vec!["Nothing to undo.".to_string()]),
            Err(err) => Err(err.into()),
        }
    }

    fn pickup(
        &mut self,
        location: &Location,
        name: &str,
        command: &str,
        destination: LocationId,
    ) -> Result<Vec<String>, SessionError> {
        let Some(item) = location
            .items
            .iter()
            .find(|item| item.to_lowercase() == name)
        else {
            return Ok(vec![format!("There is no {name} here.")]);
        };
        if self.holds(item) {
            return Ok(vec![format!("You have already picked up the {item}.")]);
        }
        self.state.inventory.push(item.clone());
        self.record(destination, command, true)?;
        Ok(vec![format!("You picked up the {item}.")])
    }

    fn start_puzzle(
        &mut self,
        puzzle: &'w Puzzle,
        command: &str,
        destination: LocationId,
    ) -> Result<Vec<String>, SessionError> {
        let mut messages = Vec::new();
        match &puzzle.kind {
            PuzzleKind::Reward { requires } => {
                if let Some(required) = requires
                    && !self.holds(required)
                {
                    return Ok(vec![puzzle.dialogue.clone()]);
                }
                if self.reward_for(puzzle)?.is_none() {
                    return Ok(vec!["You have already done that.".to_string()]);
                }
                self.record(destination, command, true)?;
                messages.push(puzzle.prompt.clone());
                self.pending = Some(Pending::Answer(puzzle));
            }
            PuzzleKind::Passage => {
                self.record(destination, command, true)?;
                push_nonempty(&mut messages, &puzzle.dialogue);
                messages.push(puzzle.prompt.clone());
                self.pending = Some(Pending::Answer(puzzle));
            }
            PuzzleKind::Blackjack => {
                self.record(destination, command, true)?;
                let (game, lines) = Blackjack::deal(&mut self.rng);
                push_nonempty(&mut messages, &puzzle.prompt);
                messages.extend(lines);
                self.pending = Some(Pending::Table { puzzle, game });
            }
            PuzzleKind::Bonus { moves } => {
                if self.state.bonus_claimed {
                    return Ok(vec![puzzle.lose.clone()]);
                }
                self.state.moves_remaining = self.state.moves_remaining.saturating_add(*moves);
                self.state.bonus_claimed = true;
                self.record(puzzle.next_loc, command, false)?;
                messages.push(puzzle.win.clone());
            }
            PuzzleKind::Submit => {
                self.record(destination, command, true)?;
                if self.score() >= self.rules.win_score {
                    self.status = Status::Won;
                    messages.push(puzzle.win.clone());
                } else {
                    messages.push(puzzle.lose.clone());
                }
            }
        }
        Ok(messages)
    }

    fn answer(&mut self, puzzle: &'w Puzzle, input: &str) -> Result<Vec<String>, SessionError> {
        if !puzzle.accepts(input) {
            return Ok(vec![puzzle.lose.clone()]);
        }
        if matches!(puzzle.kind, PuzzleKind::Reward { .. })
            && let Some(item) = self.reward_for(puzzle)?
        {
            self.state.inventory.push(item);
        }
        self.record(puzzle.next_loc, input, true)?;
        Ok(vec![puzzle.win.clone()])
    }

    fn table(
        &mut self,
        puzzle: &'w Puzzle,
        mut game: Blackjack,
        input: &str,
    ) -> Result<Vec<String>, SessionError> {
        let messages = match game.play(input, &mut self.rng) {
            Step::Leave => {
                self.record(puzzle.next_loc, input, false)?;
                let mut messages = Vec::new();
                push_nonempty(&mut messages, &puzzle.dialogue);
                return Ok(messages);
            }
            Step::RoundOver { player_won, lines } => {
                let verdict = if player_won { &puzzle.win } else { &puzzle.lose };
                std::iter::once(verdict.clone()).chain(lines).collect()
            }
            Step::Drew(lines) | Step::Dealt(lines) => lines,
            Step::Rejected(line) => vec![line],
        };
        self.pending = Some(Pending::Table { puzzle, game });
        Ok(messages)
    }

    /// The first item at the puzzle's location the player does not hold.
    fn reward_for(&self, puzzle: &Puzzle) -> Result<Option<String>, SessionError> {
        let location = self.location(puzzle.loc)?;
        Ok(location
            .items
            .iter()
            .find(|item| !self.holds(item))
            .cloned())
    }

    fn holds(&self, name: &str) -> bool {
        self.state.inventory.iter().any(|held| held == name)
    }

    /// Append an event for `destination` and snapshot the player state.
    fn record(
        &mut self,
        destination: LocationId,
        command: &str,
        costs_move: bool,
    ) -> Result<(), SessionError> {
        let location = self.location(destination)?;
        let previous = self.log.last()?.location_id();
        if costs_move && previous != destination {
            self.state.moves_remaining = self.state.moves_remaining.saturating_sub(1);
        }
        self.log.add_event(
            Event::new(destination, location.long_description.clone()),
            Some(command),
        );
        self.snapshots.push(self.state.clone());
        self.current = destination;
        Ok(())
    }

    fn here(&self) -> Result<&'w Location, SessionError> {
        self.location(self.current)
    }

    fn location(&self, id: LocationId) -> Result<&'w Location, SessionError> {
        self.world.location(id).ok_or_else(|| {
            SessionError::World(WorldError::UnknownLocation {
                id,
                context: "session".to_string(),
            })
        })
    }
}

fn push_nonempty(messages: &mut Vec<String>, text: &str) {
    if !text.is_empty() {
        messages.push(text.to_string());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::builtin().expect("bundled world")
    }

    fn session(world: &World) -> GameSession<'_> {
        GameSession::new(world, Rules::default(), 7, DeterministicRng::new(42)).expect("start")
    }

    fn play(session: &mut GameSession<'_>, commands: &[&str]) {
        for command in commands {
            session
                .apply(command)
                .unwrap_or_else(|err| panic!("{command}: {err}"));
        }
    }

    #[test]
    fn start_event_is_recorded() {
        let world = world();
        let session = session(&world);
        assert_eq!(session.log().get_id_log(), vec![7]);
        assert_eq!(session.moves_remaining(), 25);
        assert_eq!(session.status(), Status::Playing);
    }

    #[test]
    fn unknown_start_is_rejected() {
        let world = world();
        let err = GameSession::new(&world, Rules::default(), 999, DeterministicRng::new(1))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownLocation);
    }

    #[test]
    fn moving_records_and_costs_a_move() {
        let world = world();
        let mut session = session(&world);
        let turn = session.apply("  Go South ").expect("move");
        assert!(turn.recorded);
        assert_eq!(session.current_location(), 13);
        assert_eq!(session.moves_remaining(), 24);
        assert_eq!(session.log().first().expect("first").next_command(), Some("go south"));
    }

    #[test]
    fn unknown_command_changes_nothing() {
        let world = world();
        let mut session = session(&world);
        let err = session.apply("fly away").unwrap_err();
        assert!(matches!(err, SessionError::UnknownCommand { location: 7, .. }));
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn scene_uses_long_then_brief_then_long_after_look() {
        let world = world();
        let mut session = session(&world);
        let long = world.location(7).expect("7").long_description.clone();
        let brief = world.location(7).expect("7").brief_description.clone();

        assert_eq!(session.scene().expect("scene")[0], long);
        assert_eq!(session.scene().expect("scene")[0], brief);
        session.apply("look").expect("look");
        assert_eq!(session.scene().expect("scene")[0], long);
        assert!(session.scene().expect("scene").contains(&"- go south".to_string()));
    }

    #[test]
    fn menu_commands_never_record() {
        let world = world();
        let mut session = session(&world);
        for command in ["look", "inventory", "score", "log"] {
            let turn = session.apply(command).expect(command);
            assert!(!turn.recorded, "{command} recorded an event");
        }
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn pickup_twice_records_once() {
        let world = world();
        let mut session = session(&world);
        assert!(session.apply("pickup cellphone").expect("pickup").recorded);
        assert_eq!(session.inventory(), ["cellphone"]);
        assert_eq!(session.score(), 2);
        assert_eq!(session.moves_remaining(), 25);

        let again = session.apply("pickup cellphone").expect("again");
        assert!(!again.recorded);
        assert_eq!(session.log().get_id_log(), vec![7, 7]);
    }

    #[test]
    fn undo_restores_inventory_and_moves() {
        let world = world();
        let mut session = session(&world);
        play(&mut session, &["pickup cellphone", "go south"]);
        assert_eq!(session.moves_remaining(), 24);

        session.apply("undo").expect("undo");
        assert_eq!(session.current_location(), 7);
        assert_eq!(session.moves_remaining(), 25);
        assert_eq!(session.inventory(), ["cellphone"]);

        session.apply("undo").expect("undo");
        assert!(session.inventory().is_empty());
        assert_eq!(session.log().get_id_log(), vec![7]);
    }

    #[test]
    fn undo_at_start_reports_nothing_to_undo() {
        let world = world();
        let mut session = session(&world);
        let turn = session.apply("undo").expect("undo");
        assert_eq!(turn.messages, vec!["Nothing to undo.".to_string()]);
        assert_eq!(session.log().get_id_log(), vec![7]);
    }

    #[test]
    fn reward_needs_required_item() {
        let world = world();
        let mut session = session(&world);
        play(&mut session, &["go south", "go south"]);
        let turn = session.apply("call reception").expect("call");
        assert!(!turn.recorded);
        assert_eq!(turn.messages, vec!["You need a phone to call reception.".to_string()]);
    }

    #[test]
    fn reward_answer_awards_item() {
        let world = world();
        let mut session = session(&world);
        play(&mut session, &["pickup cellphone", "go south", "go south", "call reception"]);
        assert!(session.pending_prompt().is_some());

        let turn = session.apply("416-978-4500").expect("answer");
        assert!(turn.recorded);
        assert_eq!(session.inventory(), ["cellphone", "lucky mug"]);
        assert_eq!(session.score(), 7);
        assert_eq!(session.log().get_id_log(), vec![7, 7, 13, 19, 19, 19]);

        let again = session.apply("call reception").expect("again");
        assert!(!again.recorded);
    }

    #[test]
    fn wrong_answer_prints_lose_and_clears_prompt() {
        let world = world();
        let mut session = session(&world);
        play(&mut session, &["pickup cellphone", "go south", "go south", "call reception"]);
        let turn = session.apply("555").expect("answer");
        assert!(!turn.recorded);
        assert_eq!(turn.messages, vec!["The number rings out. Wrong number.".to_string()]);
        assert!(session.pending_prompt().is_none());
        assert_eq!(session.inventory(), ["cellphone"]);
    }

    #[test]
    fn notes_print_without_recording() {
        let world = world();
        let mut session = GameSession::new(&world, Rules::default(), 2, DeterministicRng::new(3))
            .expect("start");
        let turn = session.apply("knock on robarts back door").expect("knock");
        assert!(!turn.recorded);
        assert_eq!(turn.messages.len(), 1);
    }

    #[test]
    fn passage_moves_to_next_location() {
        let world = world();
        let mut session = GameSession::new(&world, Rules::default(), 2, DeterministicRng::new(3))
            .expect("start");
        play(&mut session, &["use back door", "3843", "go south"]);
        assert_eq!(session.log().get_id_log(), vec![2, 2, 1, 7]);
    }

    #[test]
    fn bonus_is_claimable_once() {
        let world = world();
        let mut session = GameSession::new(&world, Rules::default(), 30, DeterministicRng::new(3))
            .expect("start");
        let turn = session.apply("get 10 extra moves").expect("bonus");
        assert!(turn.recorded);
        assert_eq!(session.current_location(), 24);
        assert_eq!(session.moves_remaining(), 35);

        play(&mut session, &["play with them", "stand", "n"]);
        assert_eq!(session.current_location(), 30);
        assert_eq!(session.moves_remaining(), 35);

        let again = session.apply("get 10 extra moves").expect("again");
        assert!(!again.recorded);
        assert_eq!(again.messages, vec!["You already took them up on the offer.".to_string()]);
    }

    #[test]
    fn blackjack_rejects_off_script_input_and_keeps_table() {
        let world = world();
        let mut session = GameSession::new(&world, Rules::default(), 24, DeterministicRng::new(9))
            .expect("start");
        play(&mut session, &["play with them"]);
        let turn = session.apply("go north").expect("rejected");
        assert!(!turn.recorded);
        assert!(session.pending_prompt().is_some());
        assert_eq!(session.current_location(), 24);
    }

    #[test]
    fn submit_without_enough_points_does_not_win() {
        let world = world();
        let mut session = session(&world);
        let turn = session.apply("submit project").expect("submit");
        assert!(turn.recorded);
        assert_eq!(turn.status, Status::Playing);
    }

    #[test]
    fn running_out_of_moves_loses() {
        let world = world();
        let rules = Rules {
            max_moves: 2,
            win_score: 20,
        };
        let mut session = GameSession::new(&world, rules, 7, DeterministicRng::new(1))
            .expect("start");
        session.apply("go south").expect("move");
        let turn = session.apply("go north").expect("move");
        assert_eq!(turn.status, Status::Lost);
        assert!(matches!(session.apply("look"), Err(SessionError::Finished(Status::Lost))));
    }

    #[test]
    fn quit_ends_the_session() {
        let world = world();
        let mut session = session(&world);
        assert_eq!(session.apply("quit").expect("quit").status, Status::Quit);
        let err = session.apply("go south").unwrap_err();
        assert_eq!(err.code(), ErrorCode::GameFinished);
    }
}
