use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{error, info};

use crate::config::ErrorPolicy;
use crate::operations::{format_results, parse_batch};
use crate::tax::{process_batch, process_batch_lenient};

/// Counters reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub operations: usize,
}

/// Process every line of `input` as an independent batch, writing one result
/// line per batch to `output`.
///
/// A zero-length line ends the input; a line of only whitespace is malformed.
/// Each result line is flushed before the next batch is read, so an error
/// leaves earlier lines intact.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W, policy: ErrorPolicy) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (i, line) in input.lines().enumerate() {
        let line_number = i + 1;
        let line = line.context("failed to read input")?;

        if line.is_empty() {
            info!("Empty line {}, stopping", line_number);
            break;
        }

        let operations = parse_batch(&line, line_number)?;
        info!("Line {}: processing {} operations", line_number, operations.len());

        let results = match policy {
            ErrorPolicy::Abort => process_batch(&operations).map_err(|e| {
                error!("Aborting on line {}: {}", line_number, e);
                anyhow::Error::new(e).context(format!("failed to process line {}", line_number))
            })?,
            ErrorPolicy::Skip => process_batch_lenient(&operations),
        };

        let rendered = format_results(&results).context("failed to serialize results")?;
        writeln!(output, "{}", rendered).context("failed to write results")?;
        output.flush().context("failed to flush output")?;

        summary.batches += 1;
        summary.operations += operations.len();
    }

    Ok(summary)
}
