//! Command-line interface for the `tally` binary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// tally: import bank exports, then report budgets, trends and transfer checks.
///
/// Every report is printed to stdout as JSON. Diagnostics go to stderr.
#[derive(Debug, Parser, Clone)]
#[command(name = "tally", version)]
pub struct Args {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Import every account listed in a config file and print the full report.
    Report(ReportArgs),
    /// Parse a single export with one dialect and print the transactions.
    Parse(ParseArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Path to the TOML configuration. Source file paths inside it are
    /// resolved relative to its directory.
    #[arg(long, env = "TALLY_CONFIG")]
    config: PathBuf,

    /// Reference date for trends (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

impl ReportArgs {
    pub fn config(&self) -> &Path {
        &self.config
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ParseArgs {
    /// Built-in or configured dialect name, e.g. dual_column or signed_amount.
    #[arg(long)]
    dialect: String,

    /// Optional configuration providing extra dialects.
    #[arg(long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,

    file: PathBuf,
}

impl ParseArgs {
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}
