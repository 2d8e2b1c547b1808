#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trek_core::{Rules, World};
use trek_sim::{builtin_walkthroughs, load_walkthroughs, verify};

#[derive(Parser, Debug)]
#[command(
    name = "trek-sim",
    version,
    about = "Verify trek walkthroughs against a world",
    after_help = "EXAMPLES:\n    # Bundled walkthroughs on the bundled map\n    trek-sim\n\n\
                  # Custom walkthroughs on a custom map\n    trek-sim walks.toml map.json"
)]
struct Cli {
    /// Walkthrough file (TOML). The bundled walkthroughs when omitted.
    walkthroughs: Option<PathBuf>,

    /// World file (JSON). The bundled campus map when omitted.
    world: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("TREK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let walkthroughs = match &cli.walkthroughs {
        Some(path) => load_walkthroughs(path)?,
        None => builtin_walkthroughs()?,
    };
    let world = match &cli.world {
        Some(path) => World::load(path)
            .with_context(|| format!("Failed to load world {}", path.display()))?,
        None => World::builtin().context("bundled world")?,
    };

    let report = verify(&world, Rules::default(), &walkthroughs)?;

    println!(
        "verification complete: runs={} passed={} first_failure={}",
        report.runs,
        report.passed,
        report.first_failure.as_deref().unwrap_or("-")
    );
    for failure in &report.failures {
        for reason in &failure.reasons {
            println!("  {}: {reason}", failure.name);
        }
    }

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
