//! CLI argument parsing for lapsewatch

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for detection reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "lapsewatch")]
#[command(version)]
#[command(about = "Flag contributors whose commit cadence has lapsed", long_about = None)]
pub struct Cli {
    /// TOML configuration file (threshold, granularity, roster)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Roster file, one identity per line
    #[arg(short = 'r', long = "roster", value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Events file (.json array, or identity,timestamp lines)
    #[arg(short = 'e', long = "events", value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Maximum tolerated gap between adjacent events, in days (default: 7)
    #[arg(
        short = 't',
        long = "threshold-days",
        value_name = "DAYS",
        allow_negative_numbers = true
    )]
    pub threshold_days: Option<i64>,

    /// Floor gaps and threshold to whole days before comparing
    #[arg(long = "whole-days")]
    pub whole_days: bool,

    /// Scan identities in parallel
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Run against the built-in sample roster and history
    #[arg(long = "demo")]
    pub demo: bool,

    /// Exit with status 2 when any identity is flagged
    #[arg(long = "fail-on-flagged")]
    pub fail_on_flagged: bool,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
