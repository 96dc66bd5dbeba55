//! attrnorm - reset every file under a directory to normal attributes.
//!
//! Usage:
//!   attrnorm [PATH]                 Reset files under PATH (default: .)
//!   attrnorm --parent-of FILE       Reset files under FILE's directory
//!   attrnorm --format json [PATH]   Print the run report as JSON
//!   attrnorm --help                 Show help

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Context, OptionExt, Result, bail};
use tracing_subscriber::EnvFilter;

use attrnorm_walk::{NormalizeConfig, Normalizer, RunReport};

#[derive(Parser)]
#[command(
    name = "attrnorm",
    version,
    about = "Reset every file under a directory to normal attributes",
    long_about = "attrnorm walks a directory tree and clears read-only, hidden, system and \
                  archive flags on every file it finds.\n\n\
                  Files that cannot be changed are reported and skipped; the rest of \
                  the tree is still processed. Changes are not reversible."
)]
struct Cli {
    /// Directory to process (defaults to current directory)
    #[arg(env = "ATTRNORM_ROOT", conflicts_with = "parent_of")]
    path: Option<PathBuf>,

    /// Process the directory containing this file (e.g. a solution file)
    #[arg(long, value_name = "FILE")]
    parent_of: Option<PathBuf>,

    /// Skip subdirectories that cannot be read instead of aborting
    #[arg(long)]
    skip_unreadable_dirs: bool,

    /// Output format
    #[arg(short, long, default_value = "text", env = "ATTRNORM_FORMAT")]
    format: OutputFormat,

    /// Exit with an error if any file could not be reset
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = resolve_root(cli.path.as_deref(), cli.parent_of.as_deref())?;
    let config = NormalizeConfig::builder()
        .root(root)
        .skip_unreadable_dirs(cli.skip_unreadable_dirs)
        .build()
        .context("Invalid configuration")?;

    eprintln!("Normalizing attributes under {}...", config.root.display());

    let report = match Normalizer::new().normalize(&config) {
        Ok(report) => report,
        Err(err) => {
            if let Some(partial) = err.partial_report() {
                print_report(partial, cli.format)?;
            }
            return Err(err).context("Normalization failed");
        }
    };

    print_report(&report, cli.format)?;

    if cli.strict {
        if let Some(message) = incomplete_run_message(&report) {
            bail!(message);
        }
    }

    Ok(())
}

/// Why a run does not count as complete under `--strict`.
fn incomplete_run_message(report: &RunReport) -> Option<String> {
    if report.is_success() {
        return None;
    }
    Some(format!("Run incomplete ({})", report.summary()))
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Pick the root directory from the command line.
fn resolve_root(path: Option<&Path>, parent_of: Option<&Path>) -> Result<PathBuf> {
    match (path, parent_of) {
        (_, Some(file)) => {
            let file = file
                .canonicalize()
                .with_context(|| format!("Invalid path: {}", file.display()))?;
            let parent = file
                .parent()
                .ok_or_eyre("File has no parent directory")?;
            Ok(parent.to_path_buf())
        }
        (Some(path), None) => Ok(path.to_path_buf()),
        (None, None) => Ok(PathBuf::from(".")),
    }
}

/// Print a run report in the chosen format.
fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let failures: Vec<_> = report.failures().collect();

            if !failures.is_empty() || !report.skipped.is_empty() {
                println!();
                println!("{}", "─".repeat(60));
                println!(" Failures");
                println!("{}", "─".repeat(60));
                for (path, failure) in &failures {
                    println!("   {}: {}", path.display(), failure);
                }
                for skipped in &report.skipped {
                    println!("   {} (skipped): {}", skipped.path.display(), skipped.message);
                }
            }

            println!();
            println!(" {}", report.summary());
            println!(" Finished in {:.2}s", report.elapsed.as_secs_f64());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_path_conflicts_with_parent_of() {
        let result = Cli::try_parse_from(["attrnorm", "some/dir", "--parent-of", "App.sln"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_root_from_environment() {
        // SAFETY: no other test reads or writes ATTRNORM_ROOT.
        unsafe { std::env::set_var("ATTRNORM_ROOT", "/srv/solution") };
        let cli = Cli::try_parse_from(["attrnorm"]);
        unsafe { std::env::remove_var("ATTRNORM_ROOT") };

        let cli = cli.unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("/srv/solution")));
        assert!(cli.parent_of.is_none());
    }

    #[test]
    fn test_strict_reports_skipped_directories() {
        let mut report = RunReport::new("/work");
        report.record_success("/work/a.txt");
        assert!(incomplete_run_message(&report).is_none());

        report.record_skipped("/work/locked", "Permission denied");
        let message = incomplete_run_message(&report).unwrap();
        assert!(message.contains("0 failed"));
        assert!(message.contains("1 directories skipped"));
    }

    #[test]
    fn test_resolve_root_defaults_to_current_dir() {
        let root = resolve_root(None, None).unwrap();
        assert_eq!(root, PathBuf::from("."));

        let root = resolve_root(Some(Path::new("work")), None).unwrap();
        assert_eq!(root, PathBuf::from("work"));
    }

    #[test]
    fn test_resolve_root_from_solution_file() {
        let temp = TempDir::new().unwrap();
        let solution = temp.path().join("App.sln");
        fs::write(&solution, "solution").unwrap();

        let root = resolve_root(None, Some(&solution)).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_root_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.sln");
        assert!(resolve_root(None, Some(&missing)).is_err());
    }
}
