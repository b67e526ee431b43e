//! The pltsync command-line interface. Keeps a project's dialyzer PLT in sync and checks modules
//! against it.
//!
//! Provides `pltsync check` for the full synchronize-and-check run,
//! `pltsync sync` to update the PLT only, `pltsync info` to list what the
//! PLT records, and `pltsync modules` to list the project's own object files.

#![warn(missing_docs)]

mod check;
mod info;
mod modules;
mod project;
mod sync;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use pltsync_diagnostics::Selector;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// pltsync: incremental PLT synchronization for Erlang projects.
#[derive(Parser, Debug)]
#[command(name = "pltsync", version, about = "Incremental dialyzer PLT synchronizer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `pltsync.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synchronize the PLT, then check the selected modules against it.
    Check(CheckArgs),
    /// Synchronize the PLT without checking anything.
    Sync,
    /// Show the PLT location and the files it records.
    Info,
    /// List the project-owned object files that belong in the PLT.
    Modules,
}

/// Arguments for the `pltsync check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Modules to report diagnostics for: `all` or a comma-separated list.
    #[arg(short, long, default_value = "all")]
    pub modules: Selector,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(log_level(cli.quiet, cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Sync => sync::run(&global),
        Command::Info => info::run(&global),
        Command::Modules => modules::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// `--quiet` wins over `--verbose`.
fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
