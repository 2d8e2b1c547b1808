//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: framed output for a person at a terminal, plain lines for
//! pipes and scripts, or stable JSON.
//!
//! # Output mode resolution
//!
//! The mode string is settled by `trek_core::config::resolve_output`
//! (`--json`, `--format`, `FORMAT`, the config file, then TTY detection) and
//! mapped here with [`OutputMode::from_resolved`].

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use trek_core::ErrorCode;

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, rules, aligned fields).
    Pretty,
    /// Plain lines for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Returns `true` if pretty output was requested.
    pub const fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }

    /// Name accepted by `--format` and the `FORMAT` variable.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Map a resolved mode name back to the enum. Unknown names fall back to
    /// text.
    pub fn from_resolved(raw: &str) -> Self {
        match raw {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_mode_to(&mut out, mode, value, text_fn, pretty_fn)
}

/// [`render_mode`] into any writer.
pub fn render_mode_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E3001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Short name of the error class behind `error_code`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
            kind: None,
        }
    }

    /// Attach the code and hint of an [`ErrorCode`].
    pub fn with_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
            kind: Some(code.message().to_string()),
        }
    }
}

impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        match err.chain().find_map(error_code) {
            Some(code) => Self::with_code(message, code),
            None => Self::new(message),
        }
    }
}

fn error_code(cause: &(dyn std::error::Error + 'static)) -> Option<ErrorCode> {
    if let Some(err) = cause.downcast_ref::<trek_core::WorldError>() {
        return Some(err.code());
    }
    if let Some(err) = cause.downcast_ref::<trek_core::SessionError>() {
        return Some(err.code());
    }
    if let Some(err) = cause.downcast_ref::<trek_core::LogError>() {
        return Some(err.code());
    }
    cause
        .downcast_ref::<trek_core::ConfigError>()
        .map(trek_core::ConfigError::code)
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    render_error_to(&mut out, mode, error)
}

fn render_error_to(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}
