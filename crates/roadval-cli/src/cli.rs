//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roadval",
    version,
    about = "Validate road survey exports against the table schemas",
    long_about = "Validate road inventory, condition, and traffic exports.\n\n\
                  Each table CSV in the export folder is checked for required columns,\n\
                  field types, Link references, and chainage continuity. One\n\
                  <table>_validation.csv is written per table plus a JSON run summary."
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

    /// Log output format.
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

    /// Include record values in trace-level log events.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every table found in an export folder.
    Validate(ValidateArgs),

    /// List the registered table schemas.
    Tables(TablesArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Folder containing one CSV per table (e.g. Link.csv, RoadCondition.csv).
    #[arg(value_name = "EXPORT_DIR")]
    pub input_dir: PathBuf,

    /// Where reports are written (default: <EXPORT_DIR>/validation).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report files to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: ReportFormatArg,

    /// Validate and print the summary without writing reports.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub schemas: SchemasArg,

    /// Calendar year used as the upper bound for Year fields (default: this year).
    #[arg(long = "current-year", value_name = "YEAR")]
    pub current_year: Option<i32>,
}

#[derive(Parser)]
pub struct TablesArgs {
    #[command(flatten)]
    pub schemas: SchemasArg,
}

#[derive(clap::Args)]
pub struct SchemasArg {
    /// Schema TOML to use instead of the built-in one (also ROADVAL_SCHEMAS).
    #[arg(long = "schemas", value_name = "FILE")]
    pub path: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Csv,
    Json,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
