//! trek-sim library.
//!
//! Feeds scripted command lists through a [`GameSession`] and checks the
//! resulting turn logs against expectations.
//!
//! # Conventions
//!
//! - **Errors**: [`SimError`] for a failed step; `anyhow::Result` for file
//!   loading and batch verification.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod verify;
pub mod walkthrough;

pub use verify::{VerificationReport, WalkthroughFailure, check_walkthrough, verify};
pub use walkthrough::{Walkthrough, builtin_walkthroughs, load_walkthroughs, parse_walkthroughs};

use trek_core::{
    DeterministicRng, ErrorCode, GameSession, LocationId, Rules, SessionError, Status, World,
};

/// A step of a scripted run that the session refused.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("{}: could not start at location {start}: {source}", ErrorCode::WalkthroughFailed.code())]
    Start {
        start: LocationId,
        #[source]
        source: SessionError,
    },

    #[error(
        "{}: step {index} ('{command}') failed: {source}",
        ErrorCode::WalkthroughFailed.code()
    )]
    Step {
        index: usize,
        command: String,
        #[source]
        source: SessionError,
    },
}

impl SimError {
    /// Index of the failing command, if the run got that far.
    #[must_use]
    pub const fn step(&self) -> Option<usize> {
        match self {
            Self::Start { .. } => None,
            Self::Step { index, .. } => Some(*index),
        }
    }
}

/// A scripted playthrough over one world.
#[derive(Debug, Clone)]
pub struct Simulation<'w> {
    session: GameSession<'w>,
    steps_run: usize,
}

impl<'w> Simulation<'w> {
    /// Start a session at `start` with a fixed seed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Start`] if `start` is not a location in `world`.
    pub fn new(
        world: &'w World,
        rules: Rules,
        start: LocationId,
        seed: u64,
    ) -> Result<Self, SimError> {
        let session = GameSession::new(world, rules, start, DeterministicRng::new(seed))
            .map_err(|source| SimError::Start { start, source })?;
        Ok(Self {
            session,
            steps_run: 0,
        })
    }

    /// Apply every command in order, stopping at the first refusal.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Step`] with the index of the refused command. The
    /// commands before it stay applied.
    pub fn run<S: AsRef<str>>(&mut self, commands: &[S]) -> Result<(), SimError> {
        for command in commands {
            let command = command.as_ref();
            let index = self.steps_run;
            let turn = self
                .session
                .apply(command)
                .map_err(|source| SimError::Step {
                    index,
                    command: command.to_string(),
                    source,
                })?;
            self.steps_run += 1;
            tracing::trace!(
                index,
                command,
                recorded = turn.recorded,
                status = %turn.status,
                "step"
            );
        }
        Ok(())
    }

    /// Location ids of every recorded event, oldest first.
    #[must_use]
    pub fn get_id_log(&self) -> Vec<LocationId> {
        self.session.log().get_id_log()
    }

    /// Replay lines of every recorded event, oldest first.
    #[must_use]
    pub fn replay(&self) -> Vec<String> {
        self.session.log().display_events().collect()
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.session.status()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Number of commands accepted so far.
    #[must_use]
    pub const fn steps_run(&self) -> usize {
        self.steps_run
    }

    #[must_use]
    pub const fn session(&self) -> &GameSession<'w> {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::builtin().expect("bundled world")
    }

    #[test]
    fn one_step_south() {
        let world = world();
        let mut sim = Simulation::new(&world, Rules::default(), 7, 0).expect("start");
        sim.run(&["go south"]).expect("run");
        assert_eq!(sim.get_id_log(), vec![7, 13]);
        assert_eq!(sim.steps_run(), 1);
    }

    #[test]
    fn unlock_then_leave() {
        let world = world();
        let mut sim = Simulation::new(&world, Rules::default(), 4, 0).expect("start");
        sim.run(&["unlock the computer", "62759709", "go west"])
            .expect("run");
        assert_eq!(sim.get_id_log(), vec![4, 4, 4, 3]);
        assert_eq!(sim.score(), 8);
    }

    #[test]
    fn back_door_then_home() {
        let world = world();
        let mut sim = Simulation::new(&world, Rules::default(), 2, 0).expect("start");
        sim.run(&["use back door", "3843", "go south"]).expect("run");
        assert_eq!(sim.get_id_log(), vec![2, 2, 1, 7]);
        assert_eq!(sim.replay().len(), 4);
    }

    #[test]
    fn refused_command_reports_its_index() {
        let world = world();
        let mut sim = Simulation::new(&world, Rules::default(), 7, 0).expect("start");
        let err = sim
            .run(&["go south", "go south", "go west"])
            .unwrap_err();
        assert_eq!(err.step(), Some(2));
        assert!(err.to_string().contains("go west"));
        assert_eq!(sim.get_id_log(), vec![7, 13, 19]);
    }

    #[test]
    fn unknown_start_fails_before_any_step() {
        let world = world();
        let err = Simulation::new(&world, Rules::default(), 404, 0).unwrap_err();
        assert_eq!(err.step(), None);
    }
}
