//! `trek simulate`: run walkthroughs and show what they recorded.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use serde::Serialize;
use trek_core::config::TrekConfig;
use trek_core::{EventList, LocationId, Rules, Status, World};
use trek_sim::{Simulation, Walkthrough, builtin_walkthroughs, load_walkthroughs};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `trek simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Walkthrough file (TOML). The bundled walkthroughs when unset.
    #[arg(long, value_name = "FILE")]
    pub walkthrough: Option<PathBuf>,

    /// Only run the walkthrough with this name.
    #[arg(long)]
    pub name: Option<String>,

    /// World file to run against.
    #[arg(long, value_name = "PATH")]
    pub world: Option<PathBuf>,
}

/// Result of one scripted run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    pub name: String,
    pub steps_run: usize,
    pub status: Status,
    pub score: u32,
    pub log: Vec<LocationId>,
    pub replay: Vec<String>,
    /// Full turn log, one object per recorded event.
    pub events: EventList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Load the walkthroughs to run, optionally narrowed to one name.
///
/// # Errors
///
/// Fails if the file cannot be loaded or `name` matches nothing.
pub fn select_walkthroughs(
    path: Option<&std::path::Path>,
    name: Option<&str>,
) -> Result<Vec<Walkthrough>> {
    let walkthroughs = match path {
        Some(path) => load_walkthroughs(path)?,
        None => builtin_walkthroughs()?,
    };
    let Some(name) = name else {
        return Ok(walkthroughs);
    };

    let selected: Vec<Walkthrough> = walkthroughs.into_iter().filter(|w| w.name == name).collect();
    if selected.is_empty() {
        bail!("no walkthrough named '{name}'");
    }
    Ok(selected)
}

/// Run one walkthrough to completion or to its first refused step.
#[must_use]
pub fn simulate_one(world: &World, rules: Rules, walkthrough: &Walkthrough) -> SimulationOutput {
    let mut sim = match Simulation::new(world, rules, walkthrough.start, walkthrough.seed) {
        Ok(sim) => sim,
        Err(err) => {
            return SimulationOutput {
                name: walkthrough.name.clone(),
                steps_run: 0,
                status: Status::Playing,
                score: 0,
                log: Vec::new(),
                replay: Vec::new(),
                events: EventList::new(),
                error: Some(err.to_string()),
            };
        }
    };

    let error = sim
        .run(walkthrough.commands.as_slice())
        .err()
        .map(|err| err.to_string());
    SimulationOutput {
        name: walkthrough.name.clone(),
        steps_run: sim.steps_run(),
        status: sim.status(),
        score: sim.score(),
        log: sim.get_id_log(),
        replay: sim.replay(),
        events: sim.session().log().clone(),
        error,
    }
}

/// Execute `trek simulate`.
///
/// # Errors
///
/// Fails if the world or walkthroughs cannot be loaded.
pub fn run_simulate(args: &SimulateArgs, config: &TrekConfig, output: OutputMode) -> Result<()> {
    let world = super::load_world(args.world.as_deref(), config)?;
    let walkthroughs = select_walkthroughs(args.walkthrough.as_deref(), args.name.as_deref())?;
    let rules = config.game.rules();

    let runs: Vec<SimulationOutput> = walkthroughs
        .iter()
        .map(|walkthrough| simulate_one(&world, rules, walkthrough))
        .collect();
    tracing::info!(runs = runs.len(), "simulation complete");

    render_mode(
        output,
        &runs,
        |runs, w| {
            for run in runs {
                writeln!(w, "{}", run.name)?;
                for line in &run.replay {
                    writeln!(w, "  {line}")?;
                }
                writeln!(w, "  status: {} score: {}", run.status, run.score)?;
                writeln!(w, "  log: {:?}", run.log)?;
                if let Some(error) = &run.error {
                    writeln!(w, "  error: {error}")?;
                }
            }
            Ok(())
        },
        |runs, w| {
            for run in runs {
                pretty_section(w, &format!("Walkthrough: {}", run.name))?;
                for line in &run.replay {
                    writeln!(w, "{line}")?;
                }
                writeln!(w)?;
                pretty_kv(w, "steps", run.steps_run.to_string())?;
                pretty_kv(w, "status", run.status.as_str())?;
                pretty_kv(w, "score", run.score.to_string())?;
                pretty_kv(w, "log", format!("{:?}", run.log))?;
                if let Some(error) = &run.error {
                    pretty_kv(w, "error", error)?;
                }
                writeln!(w)?;
            }
            Ok(())
        },
    )
}
