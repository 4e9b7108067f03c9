//! CLI argument definitions for the column mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "colmap",
    version,
    about = "Suggest mappings from spreadsheet columns to canonical customer fields",
    long_about = "Suggest mappings from arbitrary spreadsheet headers to a fixed catalog of\n\
                  canonical customer fields.\n\n\
                  Headers are classified with literal overrides, catalog matching and\n\
                  sample-value validation; a language model is consulted for weak\n\
                  results when COLMAP_LLM_API_KEY is set."
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

    /// Include customer sample values and prompts in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map the headers of a JSON request and print the suggestions.
    Map(MapArgs),

    /// List the canonical fields of the catalog.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Request file: {"headers": [...], "sample_rows": [[...]], "workspace_id": "..."}.
    #[arg(value_name = "REQUEST")]
    pub request: PathBuf,

    /// User id of the caller.
    #[arg(long = "caller", value_name = "USER_ID")]
    pub caller: Option<String>,

    /// Workspace membership file (super_admins and [[memberships]]).
    #[arg(long = "directory", value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Configuration file with [engine] and [llm] tables.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Custom field catalog ([[fields]] tables).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Write the response JSON to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Never consult the language model.
    #[arg(long = "no-fallback")]
    pub no_fallback: bool,

    /// Worker threads for classifying columns.
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Skip the summary table on stderr.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Custom field catalog ([[fields]] tables).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Configuration file naming a catalog.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
