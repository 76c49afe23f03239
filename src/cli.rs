use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "cover-guard")]
#[command(author, version, about = "Statement coverage guard - enforce coverage thresholds")]
#[command(long_about = "A tool to check statement-level test coverage against \
    per-file, per-package and total thresholds.\n\n\
    Exit codes:\n  \
    0 - All thresholds met\n  \
    1 - Coverage below threshold\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check coverage profiles against thresholds
    Check(CheckArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Coverage profile files to analyze (merged when more than one)
    pub profiles: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root directory for locating source files named in profiles
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Prefix stripped from reported file and package names
    #[arg(long)]
    pub local_prefix: Option<String>,

    /// Exclude patterns (regex, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Minimum per-file coverage percentage (overrides config)
    #[arg(long)]
    pub threshold_file: Option<u32>,

    /// Minimum per-package coverage percentage (overrides config)
    #[arg(long)]
    pub threshold_package: Option<u32>,

    /// Minimum total coverage percentage (overrides config)
    #[arg(long)]
    pub threshold_total: Option<u32>,

    /// Write an SVG coverage badge to this path
    #[arg(long)]
    pub badge: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
