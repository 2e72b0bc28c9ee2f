//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use morele_cli::pipeline::parse_separator;
use morele_map::DEFAULT_MIN_CONFIDENCE;

#[derive(Parser)]
#[command(
    name = "morele",
    version,
    about = "Morele export transformer - map vendor product CSVs onto the Morele schema",
    long_about = "Map vendor product exports onto the fixed 20-column Morele ingestion schema.\n\n\
                  Columns are copied by a field mapping, manual overrides set a field on every\n\
                  row, and vendorPartNumber, currency and availability are never left empty."
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

    /// Allow vendor cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map a vendor CSV onto the Morele schema and write the result.
    Transform(TransformArgs),

    /// List the Morele schema fields and their defaults.
    Schema,

    /// Suggest a field mapping for a vendor CSV.
    Suggest(SuggestArgs),
}

#[derive(Parser)]
pub struct InputArgs {
    /// Vendor CSV export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Field separator (a single character, or `tab`).
    #[arg(long = "separator", default_value = ",", value_parser = parse_separator)]
    pub separator: u8,

    /// Input text encoding label, e.g. `windows-1250` (default: UTF-8).
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,
}

#[derive(Parser)]
pub struct TransformArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Mapping configuration file (.toml or .json).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Map input columns named exactly like target fields.
    #[arg(long = "auto")]
    pub auto: bool,

    /// Map a target field to a source column (repeatable).
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    pub maps: Vec<String>,

    /// Set a target field to a literal on every row (repeatable).
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub sets: Vec<String>,

    /// Directory for the timestamped output file.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Exact output path (overrides --output-dir).
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Map and report without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first N rows of the input and output.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Parser)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum confidence (0-1) for a suggestion to be shown.
    #[arg(long = "min-confidence", default_value_t = DEFAULT_MIN_CONFIDENCE)]
    pub min_confidence: f32,

    /// Save the suggestion as a mapping config (.toml or .json).
    #[arg(long = "write", value_name = "FILE")]
    pub write: Option<PathBuf>,
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
