use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use trek_core::config::TrekConfig;
use trek_sim::{VerificationReport, verify};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `trek verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Walkthrough file (TOML). The bundled walkthroughs when unset.
    #[arg(long, value_name = "FILE")]
    pub walkthrough: Option<PathBuf>,

    /// World file to verify against.
    #[arg(long, value_name = "PATH")]
    pub world: Option<PathBuf>,
}

/// Check every walkthrough's expected log and status.
///
/// # Errors
///
/// Returns an error when loading fails or any walkthrough misses its
/// expectations.
pub fn run_verify(args: &VerifyArgs, config: &TrekConfig, output: OutputMode) -> Result<()> {
    let world = super::load_world(args.world.as_deref(), config)?;
    let walkthroughs = super::simulate::select_walkthroughs(args.walkthrough.as_deref(), None)?;
    let report = verify(&world, config.game.rules(), &walkthroughs)?;

    render_mode(output, &report, write_text, |report, w| {
        pretty_section(w, "Verification")?;
        pretty_kv(w, "runs", report.runs.to_string())?;
        pretty_kv(w, "passed", report.passed.to_string())?;
        if let Some(first) = &report.first_failure {
            pretty_kv(w, "first fail", first)?;
        }
        for failure in &report.failures {
            writeln!(w)?;
            writeln!(w, "FAIL {}", failure.name)?;
            for reason in &failure.reasons {
                writeln!(w, "  {reason}")?;
            }
        }
        Ok(())
    })?;

    if report.all_passed() {
        Ok(())
    } else {
        anyhow::bail!("verify: failed");
    }
}

fn write_text(report: &VerificationReport, w: &mut dyn Write) -> std::io::Result<()> {
    for failure in &report.failures {
        for reason in &failure.reasons {
            writeln!(w, "FAIL {} ({reason})", failure.name)?;
        }
    }
    if report.all_passed() {
        writeln!(w, "verify: success ({} walkthroughs)", report.runs)
    } else {
        writeln!(
            w,
            "verify: {}/{} walkthroughs passed",
            report.passed, report.runs
        )
    }
}
