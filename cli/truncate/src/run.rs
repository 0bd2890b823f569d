//! Main execution logic for tf-truncate CLI.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::sync::Arc;
use tf_error::{ProcessingStage, ReaderError, TfError};
use tf_expression::RhaiEvaluator;
use tf_truncate::{TruncateConfig, TruncateProcessor};
use tf_types::{Event, ProcessingConfig};
use tracing::{debug, info, warn};

use crate::args::{Cli, OutputFormat};

/// Counters for one run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Events parsed from the input
    pub events_read: u64,
    /// Events written to the output
    pub events_written: u64,
    /// Events where rule processing stopped on an error
    pub events_failed: u64,
    /// Non-blank input lines that were not JSON objects
    pub lines_rejected: u64,
    /// String values rewritten
    pub values_truncated: u64,
    /// Input bytes consumed
    pub bytes_read: u64,
    /// Batches handed to the processor
    pub batches: u64,
    /// When processing started
    pub started_at: Option<DateTime<Utc>>,
    /// When processing finished
    pub completed_at: Option<DateTime<Utc>>,
}

impl RunStats {
    /// Wall-clock time of the run, once it has completed.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Execute the truncate stage with the provided arguments.
pub fn execute(args: Cli) -> Result<RunStats> {
    let processing = ProcessingConfig::new()
        .with_threads(args.threads)
        .with_batch_size(args.batch_size);
    processing.validate()?;

    let config = TruncateConfig::from_file(&args.config).with_context(|| {
        format!(
            "{}: failed to load {}",
            ProcessingStage::ConfigLoad,
            args.config.display()
        )
    })?;

    let processor =
        TruncateProcessor::from_config(&config, Arc::new(RhaiEvaluator::new()))
            .with_context(|| format!("{}: invalid rules", ProcessingStage::ConfigLoad))?
            .with_parallel(processing.is_parallel());

    if processing.is_parallel() {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(processing.threads)
            .build_global()
        {
            warn!(error = %e, "Could not size the global thread pool, using the existing one");
        }
    }

    info!(
        config = %args.config.display(),
        rules = processor.rules().len(),
        threads = processing.threads,
        batch_size = processing.batch_size,
        "Starting truncate"
    );

    let reader = open_input(&args.input)?;
    let writer = open_output(&args.output)?;

    let stats = process_stream(
        &processor,
        reader,
        writer,
        processing.batch_size,
        args.output_format,
    )?;

    info!(
        events = stats.events_read,
        failed = stats.events_failed,
        rejected = stats.lines_rejected,
        "Truncate finished"
    );

    Ok(stats)
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("failed to open input {path}"))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(path).with_context(|| format!("failed to create output {path}"))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Reads NDJSON events, truncates them batch by batch and writes them out.
///
/// Events are written in input order. Blank lines are skipped; lines that
/// are not JSON objects are logged, counted and dropped.
pub fn process_stream<R: BufRead, W: Write>(
    processor: &TruncateProcessor,
    reader: R,
    mut writer: W,
    batch_size: usize,
    format: OutputFormat,
) -> Result<RunStats> {
    let mut stats = RunStats {
        started_at: Some(Utc::now()),
        ..Default::default()
    };
    let mut batch: Vec<Event> = Vec::with_capacity(batch_size);

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("{}: failed to read line {}", ProcessingStage::EventParse, index + 1)
        })?;
        stats.bytes_read += line.len() as u64 + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match Event::from_json_str(trimmed) {
            Ok(event) => {
                stats.events_read += 1;
                batch.push(event);
            }
            Err(e) => {
                let error = rejected_line(index + 1, &e);
                warn!(
                    stage = %ProcessingStage::EventParse,
                    error = %error,
                    "Skipping line"
                );
                stats.lines_rejected += 1;
                continue;
            }
        }

        if batch.len() >= batch_size {
            flush_batch(processor, &mut batch, &mut writer, format, &mut stats)?;
        }
    }

    if !batch.is_empty() {
        flush_batch(processor, &mut batch, &mut writer, format, &mut stats)?;
    }

    writer
        .flush()
        .with_context(|| format!("{}: failed to flush output", ProcessingStage::EventWrite))?;

    stats.completed_at = Some(Utc::now());
    Ok(stats)
}

/// Describes an input line that does not hold a JSON object.
fn rejected_line(line: usize, error: &serde_json::Error) -> TfError {
    ReaderError::InvalidFormat(format!("line {line} is not a JSON object: {error}")).into()
}

fn flush_batch<W: Write>(
    processor: &TruncateProcessor,
    batch: &mut Vec<Event>,
    writer: &mut W,
    format: OutputFormat,
    stats: &mut RunStats,
) -> Result<()> {
    let report = processor.process_batch(batch);
    stats.batches += 1;
    stats.events_failed += report.failed() as u64;
    stats.values_truncated += report.values_truncated() as u64;

    debug!(
        batch = stats.batches,
        events = report.len(),
        failed = report.failed(),
        "Batch processed"
    );

    for event in batch.drain(..) {
        match format {
            OutputFormat::Jsonl => serde_json::to_writer(&mut *writer, &event),
            OutputFormat::Json => serde_json::to_writer_pretty(&mut *writer, &event),
        }
        .with_context(|| format!("{}: failed to serialize event", ProcessingStage::EventWrite))?;
        writeln!(writer)
            .with_context(|| format!("{}: failed to write event", ProcessingStage::EventWrite))?;
        stats.events_written += 1;
    }
    Ok(())
}
