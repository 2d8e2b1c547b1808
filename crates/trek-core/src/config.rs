use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::error::ErrorCode;
use crate::session::Rules;
use crate::world::LocationId;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "trek.toml";

/// A config file that exists but is not valid TOML for [`TrekConfig`].
#[derive(Debug, thiserror::Error)]
#[error("{}: failed to parse {}: {source}", ErrorCode::ConfigParseError.code(), path.display())]
pub struct ConfigError {
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}

impl ConfigError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConfigParseError
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrekConfig {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_max_moves")]
    pub max_moves: u32,
    #[serde(default = "default_win_score")]
    pub win_score: u32,
    #[serde(default = "default_start_location")]
    pub start_location: LocationId,
    #[serde(default)]
    pub seed: Option<u64>,
    /// World file; the bundled campus map when unset.
    #[serde(default)]
    pub world: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_moves: default_max_moves(),
            win_score: default_win_score(),
            start_location: default_start_location(),
            seed: None,
            world: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn rules(&self) -> Rules {
        Rules {
            max_moves: self.max_moves,
            win_score: self.win_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub config: TrekConfig,
    /// File the config came from, `None` when defaults were used.
    pub source: Option<PathBuf>,
    pub resolved_output: String,
}

/// Parse one config file.
///
/// # Errors
///
/// Fails if the file cannot be read. A file that does not parse yields a
/// [`ConfigError`] somewhere in the error chain.
pub fn load_config_file(path: &Path) -> Result<TrekConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<TrekConfig>(&content).map_err(|source| ConfigError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}

/// Find and load the config.
///
/// An explicit path must exist. Otherwise `./trek.toml` is tried, then
/// `<config dir>/trek/config.toml`, then built-in defaults.
///
/// # Errors
///
/// Fails if the chosen file cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<(TrekConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((load_config_file(path)?, Some(path.to_path_buf())));
    }

    let candidates = [
        Some(cwd.join(LOCAL_CONFIG)),
        dirs::config_dir().map(|dir| dir.join("trek/config.toml")),
    ];
    for path in candidates.into_iter().flatten() {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            return Ok((load_config_file(&path)?, Some(path)));
        }
    }

    Ok((TrekConfig::default(), None))
}

/// Load the config and settle the output mode.
///
/// # Errors
///
/// Fails if the config cannot be loaded or `cli_format` is not a known mode.
pub fn resolve_config(
    explicit: Option<&Path>,
    cwd: &Path,
    cli_json: bool,
    cli_format: Option<&str>,
) -> Result<EffectiveConfig> {
    let (config, source) = load_config(explicit, cwd)?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        cli_format,
        config.output.as_deref(),
        env_format.as_deref(),
    )?;

    Ok(EffectiveConfig {
        config,
        source,
        resolved_output,
    })
}

/// Pick the output mode: `--json`, then `--format`, then `FORMAT`, then the
/// config file, then TTY detection.
///
/// # Errors
///
/// Fails if `cli_format` is given but not a known mode.
pub fn resolve_output(
    cli_json: bool,
    cli_format: Option<&str>,
    config_output: Option<&str>,
    env_format: Option<&str>,
) -> Result<String> {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "plain" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return Ok("json".to_string());
    }

    if let Some(raw) = cli_format {
        let mode = normalize_output_mode(raw)
            .with_context(|| format!("Unknown output format '{raw}' (pretty, text, json)"))?;
        return Ok(mode.to_string());
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if let Some(mode) = config_output.and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if std::io::stdout().is_terminal() {
        Ok("pretty".to_string())
    } else {
        Ok("text".to_string())
    }
}

const fn default_max_moves() -> u32 {
    25
}

const fn default_win_score() -> u32 {
    20
}

const fn default_start_location() -> LocationId {
    7
}
