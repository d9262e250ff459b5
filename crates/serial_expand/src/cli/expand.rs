//! `expand` command - decode a candidate table into serial numbers

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

use serial_decoder::{DataSource, SerialDecoder};

use crate::cli::error::HelpfulError;
use crate::cli::load_config;
use crate::cli::output::print_table;
use crate::io::{read_candidates, write_expanded, write_failed, ColumnNames, FailedRow, TableFormat};

/// Arguments for the expand command
#[derive(Debug, Clone)]
pub struct ExpandArgs {
    pub input: PathBuf,
    pub source: DataSource,
    pub config: Option<PathBuf>,
    /// stdout when `None`
    pub expanded_out: Option<PathBuf>,
    /// `<stem>_could_not_expand.<ext>` beside the input when `None`
    pub failed_out: Option<PathBuf>,
    pub format: Option<TableFormat>,
    pub columns: ColumnNames,
    pub validate: bool,
}

/// Counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandSummary {
    pub candidates: usize,
    pub rejected_rows: usize,
    pub expanded: usize,
    pub could_not_expand: usize,
    pub runaway: usize,
    pub failed_path: PathBuf,
}

pub fn run(args: ExpandArgs) -> Result<ExpandSummary> {
    if !args.input.exists() {
        return Err(HelpfulError::file_not_found(&args.input).into());
    }
    let format = match args.format.or_else(|| TableFormat::from_path(&args.input)) {
        Some(format) => format,
        None => return Err(HelpfulError::unknown_table_format(&args.input).into()),
    };
    let config = load_config(args.config.as_deref())?;

    let table = read_candidates(&args.input, format, &args.columns)?;
    info!(
        input = %args.input.display(),
        candidates = table.candidates.len(),
        rejected = table.rejected.len(),
        "loaded candidate table"
    );

    let mut decoder = SerialDecoder::with_config(config, args.source);
    let report = if args.validate {
        decoder.decode_batch_validated(&table.candidates)
    } else {
        decoder.decode_batch(&table.candidates)
    };

    let failed: Vec<FailedRow> = table
        .rejected
        .iter()
        .map(FailedRow::from)
        .chain(report.could_not_expand.iter().map(FailedRow::from))
        .collect();

    match &args.expanded_out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_expanded(BufWriter::new(file), &report.expanded, format)?;
        }
        None => write_expanded(io::stdout().lock(), &report.expanded, format)?,
    }

    let failed_path = args
        .failed_out
        .clone()
        .unwrap_or_else(|| default_failed_path(&args.input, format));
    let file = File::create(&failed_path)
        .with_context(|| format!("Failed to create {}", failed_path.display()))?;
    write_failed(BufWriter::new(file), &failed, format)?;

    let summary = ExpandSummary {
        candidates: table.candidates.len(),
        rejected_rows: table.rejected.len(),
        expanded: report.expanded.len(),
        could_not_expand: failed.len(),
        runaway: report.runaway_count(),
        failed_path,
    };
    info!(
        expanded = summary.expanded,
        could_not_expand = summary.could_not_expand,
        runaway = summary.runaway,
        failed_out = %summary.failed_path.display(),
        "expand finished"
    );

    // stdout already carries the expanded table
    if args.expanded_out.is_some() {
        print_summary(&summary);
    }
    Ok(summary)
}

/// `<dir>/<stem>_could_not_expand.<ext>` for `input`.
pub fn default_failed_path(input: &Path, format: TableFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("candidates");
    input.with_file_name(format!("{}_could_not_expand.{}", stem, format.extension()))
}

fn print_summary(summary: &ExpandSummary) {
    print_table(
        &["candidates", "rejected rows", "expanded", "could not expand", "runaway"],
        vec![vec![
            summary.candidates.to_string(),
            summary.rejected_rows.to_string(),
            summary.expanded.to_string(),
            summary.could_not_expand.to_string(),
            summary.runaway.to_string(),
        ]],
    );
    println!("Could-not-expand rows: {}", summary.failed_path.display());
}
