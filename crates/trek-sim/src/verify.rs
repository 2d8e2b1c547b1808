//! Batch verification of walkthroughs.
//!
//! Runs every walkthrough against one world, collecting pass/fail results and
//! naming the first failing walkthrough for replay.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use trek_core::{Rules, World};

use crate::Simulation;
use crate::walkthrough::Walkthrough;

/// Failure details for a single walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkthroughFailure {
    pub name: String,
    /// Every mismatch found, in check order.
    pub reasons: Vec<String>,
}

/// Aggregate report produced by [`verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Total walkthroughs executed.
    pub runs: usize,
    /// Walkthroughs that met every expectation.
    pub passed: usize,
    /// First walkthrough that failed (for prioritized replay).
    pub first_failure: Option<String>,
    /// All failures with reasons.
    pub failures: Vec<WalkthroughFailure>,
}

impl VerificationReport {
    /// True if every walkthrough passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every walkthrough and compare against its expectations.
///
/// # Errors
///
/// Returns an error if `walkthroughs` is empty or one of them does not
/// validate. Mismatches are reported in the [`VerificationReport`], not as
/// errors.
pub fn verify(
    world: &World,
    rules: Rules,
    walkthroughs: &[Walkthrough],
) -> Result<VerificationReport> {
    if walkthroughs.is_empty() {
        bail!("no walkthroughs to verify");
    }

    let mut report = VerificationReport::default();
    for walkthrough in walkthroughs {
        walkthrough.validate()?;
        report.runs += 1;

        let reasons = check_walkthrough(world, rules, walkthrough);
        if reasons.is_empty() {
            report.passed += 1;
            tracing::debug!(name = %walkthrough.name, "walkthrough passed");
        } else {
            tracing::warn!(name = %walkthrough.name, ?reasons, "walkthrough failed");
            if report.first_failure.is_none() {
                report.first_failure = Some(walkthrough.name.clone());
            }
            report.failures.push(WalkthroughFailure {
                name: walkthrough.name.clone(),
                reasons,
            });
        }
    }

    tracing::info!(
        runs = report.runs,
        passed = report.passed,
        "verification complete"
    );
    Ok(report)
}

/// Run one walkthrough and list every expectation it misses.
#[must_use]
pub fn check_walkthrough(world: &World, rules: Rules, walkthrough: &Walkthrough) -> Vec<String> {
    let mut sim = match Simulation::new(world, rules, walkthrough.start, walkthrough.seed) {
        Ok(sim) => sim,
        Err(err) => return vec![err.to_string()],
    };

    let mut reasons = Vec::new();
    if let Err(err) = sim.run(walkthrough.commands.as_slice()) {
        reasons.push(err.to_string());
    }

    if let Some(expected) = &walkthrough.expected_log {
        let actual = sim.get_id_log();
        if &actual != expected {
            reasons.push(format!("id log mismatch: expected {expected:?}, got {actual:?}"));
        }
    }

    if let Some(expected) = walkthrough.expected_status
        && sim.status() != expected
    {
        reasons.push(format!(
            "status mismatch: expected {expected}, got {}",
            sim.status()
        ));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use trek_core::Status;

    fn walkthrough(name: &str, commands: &[&str]) -> Walkthrough {
        Walkthrough {
            name: name.to_string(),
            start: 7,
            seed: 0,
            commands: commands.iter().map(ToString::to_string).collect(),
            expected_log: None,
            expected_status: None,
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let world = World::builtin().expect("bundled world");
        assert!(verify(&world, Rules::default(), &[]).is_err());
    }

    #[test]
    fn matching_expectations_pass() {
        let world = World::builtin().expect("bundled world");
        let mut w = walkthrough("south", &["go south"]);
        w.expected_log = Some(vec![7, 13]);
        w.expected_status = Some(Status::Playing);

        let report = verify(&world, Rules::default(), &[w]).expect("verify");
        assert!(report.all_passed());
        assert_eq!(report.runs, 1);
        assert_eq!(report.passed, 1);
        assert!(report.first_failure.is_none());
    }

    #[test]
    fn every_mismatch_is_reported() {
        let world = World::builtin().expect("bundled world");
        let mut w = walkthrough("bad", &["go south", "fly"]);
        w.expected_log = Some(vec![7, 13, 19]);
        w.expected_status = Some(Status::Won);

        let reasons = check_walkthrough(&world, Rules::default(), &w);
        assert_eq!(reasons.len(), 3, "{reasons:?}");
        assert!(reasons[0].contains("step 1"));
        assert!(reasons[1].starts_with("id log mismatch"));
        assert!(reasons[2].starts_with("status mismatch"));
    }

    #[test]
    fn first_failure_names_the_earliest() {
        let world = World::builtin().expect("bundled world");
        let ok = walkthrough("ok", &["go south"]);
        let bad_a = walkthrough("bad-a", &["nope"]);
        let bad_b = walkthrough("bad-b", &["also nope"]);

        let report = verify(&world, Rules::default(), &[ok, bad_a, bad_b]).expect("verify");
        assert!(!report.all_passed());
        assert_eq!(report.runs, 3);
        assert_eq!(report.passed, 1);
        assert_eq!(report.first_failure.as_deref(), Some("bad-a"));
        assert_eq!(report.failures.len(), 2);
    }
}
