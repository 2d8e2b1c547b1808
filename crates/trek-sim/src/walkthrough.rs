//! Walkthrough files.
//!
//! A walkthrough is a named command script with optional expectations:
//!
//! ```toml
//! [[walkthrough]]
//! name = "phone-reward"
//! start = 7
//! commands = ["pickup cellphone", "go south", "go south", "call reception", "4169784500"]
//! expected_log = [7, 7, 13, 19, 19, 19]
//! expected_status = "playing"
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use trek_core::{LocationId, Status};

const BUILTIN_WALKTHROUGHS: &str = include_str!("../data/walkthroughs.toml");

const fn default_start() -> LocationId {
    7
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walkthrough {
    pub name: String,
    #[serde(default = "default_start")]
    pub start: LocationId,
    /// Seed for the card table; 0 when unset.
    #[serde(default)]
    pub seed: u64,
    pub commands: Vec<String>,
    #[serde(default)]
    pub expected_log: Option<Vec<LocationId>>,
    #[serde(default)]
    pub expected_status: Option<Status>,
}

impl Walkthrough {
    /// Check the walkthrough is usable before running it.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name or an expected log that does not
    /// begin at `start`.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("walkthrough name must not be empty");
        }
        if let Some(log) = &self.expected_log
            && log.first() != Some(&self.start)
        {
            bail!(
                "walkthrough '{}': expected_log must begin with start location {}",
                self.name,
                self.start
            );
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct WalkthroughFile {
    #[serde(default)]
    walkthrough: Vec<Walkthrough>,
}

/// Parse walkthroughs from TOML text.
///
/// # Errors
///
/// Fails on invalid TOML or a walkthrough that does not validate.
pub fn parse_walkthroughs(content: &str) -> Result<Vec<Walkthrough>> {
    let file: WalkthroughFile = toml::from_str(content).context("invalid walkthrough file")?;
    for walkthrough in &file.walkthrough {
        walkthrough.validate()?;
    }
    Ok(file.walkthrough)
}

/// Read and parse a walkthrough file.
///
/// # Errors
///
/// Fails if the file cannot be read, otherwise as [`parse_walkthroughs`].
pub fn load_walkthroughs(path: &Path) -> Result<Vec<Walkthrough>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_walkthroughs(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The walkthroughs bundled for the campus world.
///
/// # Errors
///
/// Only fails if the bundled file itself is broken.
pub fn builtin_walkthroughs() -> Result<Vec<Walkthrough>> {
    parse_walkthroughs(BUILTIN_WALKTHROUGHS).context("bundled walkthroughs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_walkthroughs_parse() {
        let walkthroughs = builtin_walkthroughs().expect("bundled walkthroughs");
        assert!(walkthroughs.len() >= 5);
        assert!(walkthroughs.iter().any(|w| w.name == "win"));
        let win = walkthroughs.iter().find(|w| w.name == "win").expect("win");
        assert_eq!(win.expected_status, Some(Status::Won));
    }

    #[test]
    fn defaults_fill_in() {
        let parsed = parse_walkthroughs(
            r#"
[[walkthrough]]
name = "short"
commands = ["go south"]
"#,
        )
        .expect("parse");
        assert_eq!(parsed[0].start, 7);
        assert_eq!(parsed[0].seed, 0);
        assert!(parsed[0].expected_log.is_none());
        assert!(parsed[0].expected_status.is_none());
    }

    #[test]
    fn expected_log_must_start_at_start() {
        let err = parse_walkthroughs(
            r#"
[[walkthrough]]
name = "bad"
start = 7
commands = ["go south"]
expected_log = [13]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must begin with start location 7"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = parse_walkthroughs("[[walkthrough]]\nname = \" \"\ncommands = []\n").unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("walk.toml");
        std::fs::write(&path, "[[walkthrough]\n").expect("write");
        let err = load_walkthroughs(&path).unwrap_err();
        assert!(format!("{err:#}").contains("walk.toml"));
    }
}
