//! `trek play`: the interactive game loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use trek_core::config::TrekConfig;
use trek_core::{DeterministicRng, ErrorCode, GameSession, LocationId, SessionError, Status};

use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section};

const INVALID_OPTION: &str = "That was an invalid option; try again.";

/// Arguments for `trek play`.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// World file to play in (defaults to the config, then the bundled map).
    #[arg(long, value_name = "PATH")]
    pub world: Option<PathBuf>,

    /// Location id to start at.
    #[arg(long, value_name = "ID")]
    pub start: Option<LocationId>,

    /// Seed for the card table. Taken from the config or the clock when unset.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

/// One line of input and what came of it.
#[derive(Debug, Serialize)]
struct RoundOutput<'a> {
    scene: Vec<String>,
    prompt: Option<&'a str>,
    input: &'a str,
    messages: Vec<String>,
    recorded: bool,
    status: Status,
    location: LocationId,
    moves_remaining: u32,
    score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
}

/// Final state printed when the loop ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaySummary {
    pub status: Status,
    pub score: u32,
    pub win_score: u32,
    pub moves_remaining: u32,
    pub log: Vec<LocationId>,
}

/// Execute `trek play` on stdin/stdout.
///
/// # Errors
///
/// Fails if the world cannot be loaded, the start location does not exist,
/// or stdin/stdout fail.
pub fn run_play(args: &PlayArgs, config: &TrekConfig, output: OutputMode) -> Result<()> {
    let world = super::load_world(args.world.as_deref(), config)?;
    let start = args.start.unwrap_or(config.game.start_location);
    let rng = match args.seed.or(config.game.seed) {
        Some(seed) => DeterministicRng::new(seed),
        None => DeterministicRng::from_clock(),
    };

    let mut session = GameSession::new(&world, config.game.rules(), start, rng)
        .with_context(|| format!("Failed to start at location {start}"))?;
    tracing::info!(start, seed = ?args.seed.or(config.game.seed), "game started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = play_loop(&mut session, stdin.lock(), &mut out, output)?;
    tracing::info!(status = %summary.status, score = summary.score, "game ended");
    Ok(())
}

/// Print the scene, read a line, apply it and print the result until the game
/// ends or `input` runs dry.
///
/// # Errors
///
/// Fails on I/O errors or a session error other than an unknown command.
pub fn play_loop<R: BufRead, W: Write>(
    session: &mut GameSession<'_>,
    mut input: R,
    out: &mut W,
    mode: OutputMode,
) -> Result<PlaySummary> {
    let mut line = String::new();
    while !session.status().is_over() {
        let prompt = session.pending_prompt();
        let scene = if prompt.is_some() {
            Vec::new()
        } else {
            session.scene()?
        };

        if !mode.is_json() {
            if !scene.is_empty() {
                if mode.is_pretty() {
                    pretty_rule(out)?;
                } else {
                    writeln!(out)?;
                }
            }
            for text in &scene {
                writeln!(out, "{text}")?;
            }
            write!(out, "{}", if prompt.is_some() { "> " } else { "Enter action: " })?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            if !mode.is_json() {
                writeln!(out)?;
            }
            tracing::debug!("input closed");
            break;
        }
        let command = line.trim();

        let (messages, recorded, error_code) = match session.apply(command) {
            Ok(turn) => (turn.messages, turn.recorded, None),
            Err(SessionError::UnknownCommand { command, location }) => {
                tracing::debug!(%command, location, "invalid option");
                (
                    vec![INVALID_OPTION.to_string()],
                    false,
                    Some(ErrorCode::UnknownCommand.code()),
                )
            }
            Err(err) => return Err(err.into()),
        };

        if mode.is_json() {
            let round = RoundOutput {
                scene,
                prompt,
                input: command,
                messages,
                recorded,
                status: session.status(),
                location: session.current_location(),
                moves_remaining: session.moves_remaining(),
                score: session.score(),
                error_code,
            };
            serde_json::to_writer(&mut *out, &round)?;
            writeln!(out)?;
        } else {
            for message in &messages {
                writeln!(out, "{message}")?;
            }
        }
    }

    let summary = PlaySummary {
        status: session.status(),
        score: session.score(),
        win_score: session.rules().win_score,
        moves_remaining: session.moves_remaining(),
        log: session.log().get_id_log(),
    };
    write_summary(out, mode, &summary)?;
    Ok(summary)
}

fn write_summary<W: Write>(out: &mut W, mode: OutputMode, summary: &PlaySummary) -> Result<()> {
    let log: Vec<String> = summary.log.iter().map(ToString::to_string).collect();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "summary": summary }))?;
            writeln!(out)?;
        }
        OutputMode::Text => {
            writeln!(out, "status: {}", summary.status)?;
            writeln!(out, "score: {}/{}", summary.score, summary.win_score)?;
            writeln!(out, "moves left: {}", summary.moves_remaining)?;
            writeln!(out, "log: {}", log.join(" "))?;
        }
        OutputMode::Pretty => {
            writeln!(out)?;
            pretty_section(out, "Game over")?;
            pretty_kv(out, "status", summary.status.as_str())?;
            pretty_kv(
                out,
                "score",
                format!("{}/{}", summary.score, summary.win_score),
            )?;
            pretty_kv(out, "moves left", summary.moves_remaining.to_string())?;
            pretty_kv(out, "log", log.join(" "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use trek_core::{Rules, World};

    fn play(world: &World, script: &str, mode: OutputMode) -> (PlaySummary, String) {
        let mut session =
            GameSession::new(world, Rules::default(), 7, DeterministicRng::new(3)).expect("start");
        let mut out = Vec::new();
        let summary =
            play_loop(&mut session, Cursor::new(script), &mut out, mode).expect("loop runs");
        (summary, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn quit_ends_the_loop() {
        let world = World::builtin().expect("bundled world");
        let (summary, out) = play(&world, "quit\nlook\n", OutputMode::Text);
        assert_eq!(summary.status, Status::Quit);
        assert_eq!(summary.log, vec![7]);
        assert!(out.contains("Goodbye."));
        assert!(out.contains("status: quit"));
    }

    #[test]
    fn invalid_option_keeps_going() {
        let world = World::builtin().expect("bundled world");
        let (summary, out) = play(&world, "fly away\ngo south\nquit\n", OutputMode::Text);
        assert!(out.contains(INVALID_OPTION));
        assert_eq!(summary.log, vec![7, 13]);
    }

    #[test]
    fn closed_input_leaves_game_in_progress() {
        let world = World::builtin().expect("bundled world");
        let (summary, out) = play(&world, "go south\n", OutputMode::Text);
        assert_eq!(summary.status, Status::Playing);
        assert_eq!(summary.moves_remaining, 24);
        assert!(out.contains("log: 7 13"));
    }

    #[test]
    fn first_visit_is_long_then_brief() {
        let world = World::builtin().expect("bundled world");
        let long = &world.location(7).expect("dorm").long_description;
        let brief = &world.location(7).expect("dorm").brief_description;
        let (_, out) = play(&world, "inventory\nquit\n", OutputMode::Text);
        assert_eq!(out.matches(long.as_str()).count(), 1);
        assert!(out.contains(brief.as_str()));
    }

    #[test]
    fn puzzle_answer_is_read_from_the_next_line() {
        let world = World::builtin().expect("bundled world");
        let script = "pickup cellphone\ngo south\ngo south\ncall reception\n416-978-4500\nscore\nquit\n";
        let (summary, out) = play(&world, script, OutputMode::Text);
        assert!(out.contains("Enter the reception phone number: "));
        assert!(out.contains("> "));
        assert!(out.contains("You currently have 7/20 points."));
        assert_eq!(summary.score, 7);
        assert_eq!(summary.log, vec![7, 7, 13, 19, 19, 19]);
    }

    #[test]
    fn json_mode_emits_one_object_per_line() {
        let world = World::builtin().expect("bundled world");
        let (summary, out) = play(&world, "go south\nnope\nquit\n", OutputMode::Json);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["input"], "go south");
        assert_eq!(lines[0]["location"], 13);
        assert_eq!(lines[0]["recorded"], true);
        assert!(!lines[0]["scene"].as_array().expect("scene").is_empty());
        assert_eq!(lines[1]["error_code"], "E3001");
        assert_eq!(lines[2]["status"], "quit");
        assert_eq!(lines[3]["summary"]["log"], serde_json::json!([7, 13]));
        assert_eq!(summary.status, Status::Quit);
    }

    #[test]
    fn pretty_summary_uses_sections() {
        let world = World::builtin().expect("bundled world");
        let (_, out) = play(&world, "quit\n", OutputMode::Pretty);
        assert!(out.contains("Game over\n"));
        assert!(out.contains("status:      quit"));
    }
}
