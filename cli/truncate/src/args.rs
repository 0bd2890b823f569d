//! CLI argument definitions for tf-truncate.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
pub use tf_cli_common::{LogFormat, LogLevel};

/// Truncates event fields according to ordered rules.
///
/// Reads newline-delimited JSON events, applies every rule of the config file
/// to each event, and writes the events back out in the same order.
///
/// ## Examples
///
/// Truncate a file, writing to stdout:
///   tf-truncate -c rules.yaml -i events.ndjson
///
/// As a filter in a shell pipeline, on 4 threads:
///   cat events.ndjson | tf-truncate -c rules.yaml -t 4 > out.ndjson
#[derive(Parser, Debug)]
#[command(name = "tf-truncate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Rules ===
    /// Rules file (YAML; JSON when the extension is .json)
    #[arg(short = 'c', long, env = "TF_CONFIG")]
    pub config: PathBuf,

    // === Input / Output ===
    /// Input file of NDJSON events ("-" for stdin)
    #[arg(short = 'i', long, default_value = "-")]
    pub input: String,

    /// Output file ("-" for stdout)
    #[arg(short = 'o', long, default_value = "-")]
    pub output: String,

    /// Output format
    #[arg(long, value_enum, default_value = "jsonl")]
    pub output_format: OutputFormat,

    // === Processing ===
    /// Number of processing threads (must be >= 1; 1 processes sequentially)
    #[arg(short = 't', long, env = "TF_THREADS", default_value_t = num_cpus(), value_parser = parse_positive_usize)]
    pub threads: usize,

    /// Events per batch (must be >= 1)
    #[arg(long, env = "TF_BATCH_SIZE", default_value = "2000", value_parser = parse_positive_usize)]
    pub batch_size: usize,

    // === Logging ===
    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Output format for processed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    Jsonl,
    /// Pretty-printed JSON objects
    Json,
}

/// Get the number of available CPUs.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value < 1 {
        return Err(format!("{value} is not in 1.."));
    }
    Ok(value)
}
