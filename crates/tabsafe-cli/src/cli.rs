//! CLI argument definitions for the tabsafe viewer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabsafe",
    version,
    about = "Resilient tabular data viewer",
    long_about = "Coerce arbitrary, possibly malformed JSON into a safe tabular view.\n\n\
                  Malformed elements are flagged instead of failing, and the demo\n\
                  subcommand walks a simulated rendering host through a fault,\n\
                  suppression, and repair cycle."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Render a JSON document as a table.
    View(ViewArgs),

    /// Run the fault-suppression walkthrough on a simulated host.
    Demo(DemoArgs),
}

#[derive(Parser)]
pub struct ViewArgs {
    /// Path to a JSON document of any shape.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Case-insensitive substring filter applied across all fields.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Field to sort by.
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort_field: Option<String>,

    /// Sort direction.
    #[arg(long = "order", value_enum, default_value = "asc")]
    pub order: SortOrderArg,

    /// Rows rendered per page.
    #[arg(long = "page-size", value_name = "N", default_value_t = 10)]
    pub page_size: usize,

    /// Explicit comma-separated column keys (skips inference).
    #[arg(long = "columns", value_name = "KEYS", value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[derive(Parser)]
pub struct DemoArgs {
    /// Number of faults injected through the error channel.
    #[arg(long = "faults", default_value_t = 3)]
    pub faults: u32,

    /// Event-loop ticks to run after injection.
    #[arg(long = "ticks", default_value_t = 8)]
    pub ticks: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortOrderArg {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
