//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "health-pipeline",
    version,
    about = "Merge CDC chronic disease indicators with NCHS mortality statistics",
    long_about = "Merge CDC chronic disease indicators with NCHS leading causes of death.\n\n\
                  Downloads both source tables, keeps age-adjusted overall mortality\n\
                  indicators, joins them to death counts on year, state and cause,\n\
                  and writes the result to SQLite and CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch, process and write the merged table.
    Run(RunArgs),

    /// Download the raw source files only.
    Fetch(ConfigArgs),

    /// Check the SQLite output and exit non-zero on failure.
    Verify(VerifyArgs),

    /// Print the output table definition.
    Schema,

    /// Print the active topic to cause mapping.
    Mapping(ConfigArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML configuration file; built-in defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Use the local copies of the source files without downloading.
    #[arg(long = "skip-fetch")]
    pub skip_fetch: bool,

    /// Chronic disease indicators CSV.
    #[arg(long = "chronic", value_name = "PATH")]
    pub chronic: Option<PathBuf>,

    /// NCHS leading causes of death CSV.
    #[arg(long = "mortality", value_name = "PATH")]
    pub mortality: Option<PathBuf>,

    /// SQLite database to write.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Table name inside the database.
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// CSV export to write.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Print the run report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// SQLite database to check.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Table name inside the database.
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Print the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
