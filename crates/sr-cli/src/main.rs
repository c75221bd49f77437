//! # sr CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! With no subcommand, `sr` runs `compare` on the base directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sr_cli::compare::{run_compare, CompareArgs};
use sr_cli::lint::{run_lint, LintArgs};
use sr_cli::validate::{run_validate, ValidateArgs};
use sr_cli::EXIT_OPERATIONAL;

/// Schema Resume drift toolkit.
///
/// Compares the JSON Schema, JSON-LD context, meta-schema and XSD for
/// field drift, lints each file, and validates resume documents.
#[derive(Parser, Debug)]
#[command(name = "sr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory containing schema.json, context.jsonld, meta-schema.json and xml/1.0/.
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Path to a YAML comparison config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report field presence across the four representations (default).
    Compare(CompareArgs),

    /// Check each representation file's structure.
    Lint(LintArgs),

    /// Validate resume documents against schema.json.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let base_dir = cli.base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    tracing::debug!(base_dir = %base_dir.display(), "resolved base directory");

    let result = match &cli.command {
        None => run_compare(&CompareArgs::default(), &base_dir, cli.config.as_deref()),
        Some(Commands::Compare(args)) => run_compare(args, &base_dir, cli.config.as_deref()),
        Some(Commands::Lint(args)) => run_lint(args, &base_dir),
        Some(Commands::Validate(args)) => run_validate(args, &base_dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_no_subcommand_defaults_to_compare() {
        let cli = Cli::try_parse_from(["sr"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.base_dir.is_none());
    }

    #[test]
    fn cli_parse_compare_json() {
        let cli = Cli::try_parse_from(["sr", "compare", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Compare(args)) => assert!(args.json),
            other => panic!("expected compare, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["sr", "compare", "--base-dir", "/repo", "--config", "sr.yaml"]).unwrap();
        assert_eq!(cli.base_dir, Some(PathBuf::from("/repo")));
        assert_eq!(cli.config, Some(PathBuf::from("sr.yaml")));
    }

    #[test]
    fn cli_parse_lint() {
        let cli = Cli::try_parse_from(["sr", "lint"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Lint(_))));
    }

    #[test]
    fn cli_parse_validate_files_and_schema() {
        let cli =
            Cli::try_parse_from(["sr", "validate", "a.json", "b.yaml", "--schema", "s.json"]).unwrap();
        match cli.command {
            Some(Commands::Validate(args)) => {
                assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
                assert_eq!(args.schema, Some(PathBuf::from("s.json")));
                assert!(!args.json);
            }
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_validate_requires_files() {
        assert!(Cli::try_parse_from(["sr", "validate"]).is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        assert_eq!(Cli::try_parse_from(["sr"]).unwrap().verbose, 0);
        assert_eq!(Cli::try_parse_from(["sr", "-v", "lint"]).unwrap().verbose, 1);
        assert_eq!(Cli::try_parse_from(["sr", "-vvv"]).unwrap().verbose, 3);
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["sr", "nonexistent"]).is_err());
    }
}
