//! `trek world`: list what the loaded world contains.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use trek_core::config::TrekConfig;
use trek_core::world::{Item, Location, Puzzle, PuzzleKind};

use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `trek world`.
#[derive(Args, Debug)]
pub struct WorldArgs {
    /// World file to inspect.
    #[arg(long, value_name = "PATH")]
    pub world: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct WorldListing<'a> {
    locations: Vec<&'a Location>,
    items: Vec<&'a Item>,
    puzzles: &'a [Puzzle],
}

/// Execute `trek world`.
///
/// # Errors
///
/// Fails if the world cannot be loaded or validated.
pub fn run_world(args: &WorldArgs, config: &TrekConfig, output: OutputMode) -> Result<()> {
    let world = super::load_world(args.world.as_deref(), config)?;
    let listing = WorldListing {
        locations: world.locations().collect(),
        items: world.items().collect(),
        puzzles: world.puzzles(),
    };

    render_mode(
        output,
        &listing,
        |listing, w| {
            for location in &listing.locations {
                writeln!(w, "location {} {}", location.id, location.brief_description)?;
            }
            for item in &listing.items {
                writeln!(
                    w,
                    "item {} @{} -> {} ({} pts)",
                    item.name, item.start_position, item.target_position, item.target_points
                )?;
            }
            for puzzle in listing.puzzles {
                writeln!(
                    w,
                    "puzzle {} @{} '{}' -> {}",
                    kind_label(&puzzle.kind),
                    puzzle.loc,
                    puzzle.command,
                    puzzle.next_loc
                )?;
            }
            Ok(())
        },
        |listing, w| {
            pretty_section(w, &format!("Locations ({})", listing.locations.len()))?;
            for location in &listing.locations {
                writeln!(w, "{:>4}  {}", location.id, location.brief_description)?;
                for (command, destination) in &location.available_commands {
                    writeln!(w, "        {command} -> {destination}")?;
                }
            }
            writeln!(w)?;
            pretty_section(w, &format!("Items ({})", listing.items.len()))?;
            for item in &listing.items {
                writeln!(
                    w,
                    "{:<16} {:>2} pts  {} -> {}",
                    item.name, item.target_points, item.start_position, item.target_position
                )?;
            }
            writeln!(w)?;
            pretty_section(w, &format!("Puzzles ({})", listing.puzzles.len()))?;
            for puzzle in listing.puzzles {
                writeln!(
                    w,
                    "{:<10} {:>4}  {} -> {}",
                    kind_label(&puzzle.kind),
                    puzzle.loc,
                    puzzle.command,
                    puzzle.next_loc
                )?;
            }
            Ok(())
        },
    )
}

const fn kind_label(kind: &PuzzleKind) -> &'static str {
    match kind {
        PuzzleKind::Reward { .. } => "reward",
        PuzzleKind::Passage => "passage",
        PuzzleKind::Blackjack => "blackjack",
        PuzzleKind::Bonus { .. } => "bonus",
        PuzzleKind::Submit => "submit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_serde_tags() {
        let kinds = [
            PuzzleKind::Reward { requires: None },
            PuzzleKind::Passage,
            PuzzleKind::Blackjack,
            PuzzleKind::Bonus { moves: 10 },
            PuzzleKind::Submit,
        ];
        for kind in kinds {
            let json = serde_json::to_value(&kind).expect("serialize");
            assert_eq!(json["type"], kind_label(&kind));
        }
    }
}
