//! CLI argument definitions for the resolution pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pdr",
    version,
    about = "Provider directory identity resolution",
    long_about = "Collapse scraped provider-directory rows into canonical identities,\n\
                  then match them against state and national registry extracts\n\
                  to enrich the ones that match uniquely."
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
    /// Resolve a batch of scraped rows into canonical identities.
    Resolve(ResolveArgs),

    /// Match a fixed-width state registry extract against a resolved batch.
    MatchAuthority(MatchAuthorityArgs),

    /// Match a national registry JSON extract against a resolved batch.
    MatchNational(MatchNationalArgs),

    /// Show the built-in degree and credential vocabularies.
    Vocab,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// CSV file of scraped directory rows.
    #[arg(value_name = "RECORDS_CSV")]
    pub records: PathBuf,

    /// CSV table mapping raw addresses to zip codes.
    #[arg(long = "zips", value_name = "ZIPS_CSV")]
    pub zips: Option<PathBuf>,

    /// Directory to persist the resolved batch in.
    #[arg(long = "store", value_name = "DIR", default_value = "pdr-store")]
    pub store: PathBuf,

    /// Number of bucket convergence passes.
    #[arg(long = "passes", value_name = "N", default_value_t = 2)]
    pub passes: usize,

    /// Write the full resolution report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MatchAuthorityArgs {
    /// Fixed-width registry extract.
    #[arg(value_name = "EXTRACT")]
    pub extract: PathBuf,

    /// Directory holding the resolved batch.
    #[arg(long = "store", value_name = "DIR", default_value = "pdr-store")]
    pub store: PathBuf,

    /// Directory to write match artifacts to.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MatchNationalArgs {
    /// JSON registry extract.
    #[arg(value_name = "EXTRACT")]
    pub extract: PathBuf,

    /// Directory holding the resolved batch.
    #[arg(long = "store", value_name = "DIR", default_value = "pdr-store")]
    pub store: PathBuf,

    /// Directory to write match artifacts to.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
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
