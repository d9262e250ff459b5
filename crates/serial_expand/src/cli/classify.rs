//! `classify` command - show how range strings are read

use anyhow::Result;
use comfy_table::Color;

use serial_decoder::{DataSource, DecodeError, RangeBounds, SerialDecoder};

use crate::cli::load_config;
use crate::cli::output::{print_table_colored, truncate};
use std::path::PathBuf;

const MEMBER_PREVIEW_WIDTH: usize = 48;

/// Arguments for the classify command
#[derive(Debug, Clone)]
pub struct ClassifyArgs {
    pub values: Vec<String>,
    pub count: u32,
    pub source: DataSource,
    pub config: Option<PathBuf>,
}

/// One printed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyRow {
    pub raw: String,
    pub normalized: String,
    pub outcome: std::result::Result<ClassifiedRange, DecodeError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRange {
    pub kind: String,
    pub prefix: String,
    pub start: String,
    pub end: String,
    pub suffix: String,
    pub members: std::result::Result<Vec<String>, DecodeError>,
}

/// Classify every value on one decoder, so repeats continue numbering.
pub fn classify_values(decoder: &mut SerialDecoder, values: &[String], count: u32) -> Vec<ClassifyRow> {
    values
        .iter()
        .map(|raw| {
            let normalized = decoder.normalize(raw, count);
            let outcome = decoder.classify(raw, count).map(|classification| {
                let (start, end) = match &classification.bounds {
                    RangeBounds::Span { start, end } => (start.to_string(), end.to_string()),
                    RangeBounds::List { body } => (body.clone(), String::new()),
                };
                ClassifiedRange {
                    kind: classification.kind.to_string(),
                    prefix: classification.prefix.clone(),
                    start,
                    end,
                    suffix: classification.suffix.clone(),
                    members: decoder.expand(&classification, count),
                }
            });
            ClassifyRow {
                raw: raw.clone(),
                normalized,
                outcome,
            }
        })
        .collect()
}

pub fn run(args: ClassifyArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut decoder = SerialDecoder::with_config(config, args.source);
    let rows = classify_values(&mut decoder, &args.values, args.count);

    let table_rows = rows
        .into_iter()
        .map(|row| match row.outcome {
            Ok(range) => {
                let members = match &range.members {
                    Ok(members) => (
                        truncate(&members.join(" "), MEMBER_PREVIEW_WIDTH),
                        None,
                    ),
                    Err(e) => (e.code().to_string(), Some(Color::Yellow)),
                };
                vec![
                    (row.raw, None),
                    (row.normalized, None),
                    (range.kind, Some(Color::Green)),
                    (range.prefix, None),
                    (range.start, None),
                    (range.end, None),
                    (range.suffix, None),
                    members,
                ]
            }
            Err(e) => vec![
                (row.raw, None),
                (row.normalized, None),
                (e.code().to_string(), Some(Color::Red)),
                (String::new(), None),
                (String::new(), None),
                (String::new(), None),
                (String::new(), None),
                (e.to_string(), None),
            ],
        })
        .collect();

    print_table_colored(
        &["raw", "normalized", "kind", "prefix", "start", "end", "suffix", "members"],
        table_rows,
    );
    Ok(())
}
