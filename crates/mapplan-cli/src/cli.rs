//! Command-line arguments for `mapplan`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mapplan",
    version,
    about = "Resolve property mapping plans between record types",
    long_about = "Resolve property mapping plans between record types.\n\n\
                  Reads a JSON catalog of type schemas, converters and mapping\n\
                  declarations, and prints how each destination property is populated."
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
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the plan for one source/destination pair.
    Plan(PlanArgs),

    /// Resolve every mapping declared in the catalog.
    Declared(DeclaredArgs),

    /// List the types registered in a catalog.
    Types(TypesArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Collect a diagnostic for every property left out or degraded.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Match property names ignoring ASCII case.
    #[arg(long = "ignore-case")]
    pub ignore_case: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Path to the JSON catalog document.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Source type id.
    #[arg(long = "source", value_name = "TYPE")]
    pub source: String,

    /// Destination type id.
    #[arg(long = "dest", value_name = "TYPE")]
    pub dest: String,

    #[command(flatten)]
    pub resolve: ResolveArgs,
}

#[derive(Args)]
pub struct DeclaredArgs {
    /// Path to the JSON catalog document.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    #[command(flatten)]
    pub resolve: ResolveArgs,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Path to the JSON catalog document.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Text,
    Json,
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
