#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use trek_core::config::resolve_config;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "trek: a campus text adventure with an undoable turn log",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ./trek.toml or the user config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Game",
        about = "Play the game on stdin/stdout",
        long_about = "Start an interactive session. Each turn prints the current scene, reads one\n\
                      line, applies it and prints the result, until the game ends or input closes.",
        after_help = "EXAMPLES:\n    # Play the bundled campus map\n    trek play\n\n\
                      # Fix the card table's shuffle\n    trek play --seed 42\n\n\
                      # Feed a script and read one JSON object per turn\n    trek play --seed 1 --json < moves.txt"
    )]
    Play(cmd::play::PlayArgs),

    #[command(
        next_help_heading = "Walkthroughs",
        about = "Run walkthroughs and print their replay",
        long_about = "Run each walkthrough through a fresh session and print the recorded replay,\n\
                      the location id log and the final status.",
        after_help = "EXAMPLES:\n    # Run every bundled walkthrough\n    trek simulate\n\n\
                      # Run one walkthrough from a file\n    trek simulate --walkthrough walks.toml --name win"
    )]
    Simulate(cmd::simulate::SimulateArgs),

    #[command(
        next_help_heading = "Walkthroughs",
        about = "Check walkthroughs against their expectations",
        long_about = "Run each walkthrough and compare its id log and final status with the\n\
                      expected values. Exits non-zero if any walkthrough misses.",
        after_help = "EXAMPLES:\n    # Verify the bundled walkthroughs\n    trek verify\n\n\
                      # Verify a custom set against a custom world\n    trek verify --walkthrough walks.toml --world map.json"
    )]
    Verify(cmd::verify::VerifyArgs),

    #[command(
        next_help_heading = "World",
        about = "List locations, items and puzzles",
        after_help = "EXAMPLES:\n    # Show the bundled map\n    trek world\n\n\
                      # Validate and dump a custom map\n    trek world --world map.json --json"
    )]
    World(cmd::world::WorldArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    trek completions bash > ~/.local/share/bash-completion/completions/trek"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TREK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "trek=debug,info"
        } else {
            "trek=info,warn"
        })
    });

    let format = env::var("TREK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: OutputMode, config: &trek_core::config::TrekConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Play(args) => cmd::play::run_play(&args, config, output),
        Commands::Simulate(args) => cmd::simulate::run_simulate(&args, config, output),
        Commands::Verify(args) => cmd::verify::run_verify(&args, config, output),
        Commands::World(args) => cmd::world::run_world(&args, config, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let cwd = env::current_dir()?;
    let fallback = if cli.json {
        OutputMode::Json
    } else {
        cli.format.unwrap_or(OutputMode::Text)
    };
    let effective = match resolve_config(
        cli.config.as_deref(),
        &cwd,
        cli.json,
        cli.format.map(OutputMode::as_str),
    ) {
        Ok(effective) => effective,
        Err(err) => {
            render_error(fallback, &CliError::from(&err))?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let output = OutputMode::from_resolved(&effective.resolved_output);
    if let Some(source) = &effective.source {
        tracing::debug!(path = %source.display(), "config loaded");
    }

    match run(cli, output, &effective.config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            render_error(output, &CliError::from(&err))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_before_subcommand() {
        let cli = Cli::parse_from(["trek", "--json", "world"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::World(_)));
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["trek", "verify", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn format_flag_parses_value_enum() {
        let cli = Cli::parse_from(["trek", "world", "--format", "pretty"]);
        assert_eq!(cli.format, Some(OutputMode::Pretty));
        assert!(Cli::try_parse_from(["trek", "world", "--format", "yaml"]).is_err());
    }

    #[test]
    fn play_flags() {
        let cli = Cli::parse_from(["trek", "play", "--seed", "42", "--start", "13"]);
        match cli.command {
            Commands::Play(args) => {
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.start, Some(13));
                assert!(args.world.is_none());
            }
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn simulate_flags() {
        let cli = Cli::parse_from([
            "trek",
            "simulate",
            "--walkthrough",
            "walks.toml",
            "--name",
            "win",
        ]);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.walkthrough, Some(PathBuf::from("walks.toml")));
                assert_eq!(args.name.as_deref(), Some("win"));
            }
            other => panic!("expected simulate, got {other:?}"),
        }
    }

    #[test]
    fn config_and_verbose_are_global() {
        let cli = Cli::parse_from(["trek", "play", "-v", "--config", "custom.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["trek", "play"],
            vec!["trek", "simulate"],
            vec!["trek", "verify"],
            vec!["trek", "world"],
            vec!["trek", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} error: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn command_factory_is_consistent() {
        Cli::command().debug_assert();
    }
}
