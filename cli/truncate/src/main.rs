//! tf-truncate CLI
//!
//! Runs NDJSON events through the truncflow truncate stage.

use clap::Parser;
use tf_cli_common::{format_bytes, format_number, init_logging};

mod args;
mod run;

use args::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for output)
    init_logging(args.log_level, args.log_format)?;

    let stats = run::execute(args)?;

    // Report results to stderr
    eprintln!();
    eprintln!("Truncate completed:");
    eprintln!("  Events read:      {}", format_number(stats.events_read));
    eprintln!("  Events written:   {}", format_number(stats.events_written));
    eprintln!("  Events failed:    {}", format_number(stats.events_failed));
    eprintln!("  Lines rejected:   {}", format_number(stats.lines_rejected));
    eprintln!("  Values truncated: {}", format_number(stats.values_truncated));
    eprintln!("  Bytes read:       {}", format_bytes(stats.bytes_read));

    if let Some(duration) = stats.duration() {
        let secs = duration.num_milliseconds() as f64 / 1000.0;
        eprintln!("  Duration:         {secs:.2}s");

        if secs > 0.0 && stats.events_read > 0 {
            eprintln!(
                "  Throughput:       {} events/sec",
                format_number((stats.events_read as f64 / secs) as u64)
            );
        }
    }

    Ok(())
}
