//! Reading candidate tables and writing result tables.
//!
//! Upstream extracts are pandas-style: counts may be blank, `NaN` or
//! `5.0`. Rows that break the decoder's input contract (blank range,
//! negative or fractional count, non-string range in JSON) are not decoded;
//! they are returned as [`RejectedRow`]s and written to the
//! could-not-expand table with the code `invalid_input`.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use serial_decoder::{CouldNotExpand, ExpansionResult, RangeCandidate};

/// Tabular file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    /// Guess from a file extension; `None` when it is neither.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(TableFormat::Csv),
            "json" => Some(TableFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        }
    }
}

/// Input column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub raw: String,
    pub count: String,
    pub key: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            raw: "raw".to_string(),
            count: "expected_count".to_string(),
            key: "key".to_string(),
        }
    }
}

/// An input row that was refused before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub raw: String,
    pub expected_count: String,
    pub correlation_key: String,
    pub reason: String,
}

/// Result of loading an input table.
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub candidates: Vec<RangeCandidate>,
    pub rejected: Vec<RejectedRow>,
}

/// One row of the could-not-expand output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRow {
    pub raw: String,
    pub expected_count: String,
    pub correlation_key: String,
    pub reason_code: String,
    pub reason: String,
}

impl From<&CouldNotExpand> for FailedRow {
    fn from(row: &CouldNotExpand) -> Self {
        Self {
            raw: row.raw.clone(),
            expected_count: row.expected_count.to_string(),
            correlation_key: row.correlation_key.to_string(),
            reason_code: row.reason.code().to_string(),
            reason: row.reason.to_string(),
        }
    }
}

impl From<&RejectedRow> for FailedRow {
    fn from(row: &RejectedRow) -> Self {
        Self {
            raw: row.raw.clone(),
            expected_count: row.expected_count.clone(),
            correlation_key: row.correlation_key.clone(),
            reason_code: "invalid_input".to_string(),
            reason: format!("row {}: {}", row.row, row.reason),
        }
    }
}

/// Parse an upstream count cell.
///
/// Blank, `NaN`, `null` and `None` mean unknown (0). Whole floats such as
/// `5.0` are accepted. Negative values are returned as-is for the
/// candidate constructor to reject.
pub fn parse_count(text: &str) -> std::result::Result<i64, String> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
    {
        return Ok(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        Ok(_) => Err(format!("expected count '{}' is not a whole number", trimmed)),
        Err(_) => Err(format!("expected count '{}' is not a number", trimmed)),
    }
}

/// Load candidates from `path`.
pub fn read_candidates(path: &Path, format: TableFormat, columns: &ColumnNames) -> Result<LoadedTable> {
    match format {
        TableFormat::Csv => read_csv(path, columns),
        TableFormat::Json => read_json(path, columns),
    }
}

fn read_csv(path: &Path, columns: &ColumnNames) -> Result<LoadedTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let raw_idx = match position(&columns.raw) {
        Some(idx) => idx,
        None => bail!(
            "Column '{}' not found in {} (columns: {})",
            columns.raw,
            path.display(),
            headers.iter().collect::<Vec<_>>().join(", ")
        ),
    };
    let count_idx = position(&columns.count);
    let key_idx = position(&columns.key);

    let mut table = LoadedTable::default();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let record = record
            .with_context(|| format!("Failed to parse CSV row {} in {}", row, path.display()))?;
        let raw = record.get(raw_idx).unwrap_or("").to_string();
        let count = count_idx.and_then(|i| record.get(i)).unwrap_or("").to_string();
        let key = key_idx
            .and_then(|i| record.get(i))
            .map(str::to_string)
            .unwrap_or_else(|| row.to_string());
        push_row(&mut table, row, raw, count, key);
    }
    Ok(table)
}

fn read_json(path: &Path, columns: &ColumnNames) -> Result<LoadedTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;
    let rows = match value {
        Value::Array(rows) => rows,
        _ => bail!("Expected a JSON array of objects in {}", path.display()),
    };

    let mut table = LoadedTable::default();
    for (idx, item) in rows.iter().enumerate() {
        let row = idx + 1;
        let object = match item.as_object() {
            Some(object) => object,
            None => bail!("Row {} in {} is not a JSON object", row, path.display()),
        };

        let count = object.get(&columns.count).map(scalar_text).unwrap_or_default();
        let key = object
            .get(&columns.key)
            .map(scalar_text)
            .unwrap_or_else(|| row.to_string());

        match object.get(&columns.raw) {
            Some(Value::String(raw)) => push_row(&mut table, row, raw.clone(), count, key),
            other => table.rejected.push(RejectedRow {
                row,
                raw: other.map(scalar_text).unwrap_or_default(),
                expected_count: count,
                correlation_key: key,
                reason: format!("'{}' must be a string", columns.raw),
            }),
        }
    }
    Ok(table)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn push_row(table: &mut LoadedTable, row: usize, raw: String, count: String, key: String) {
    let outcome = parse_count(&count).and_then(|parsed| {
        RangeCandidate::try_new(raw.clone(), parsed, key.clone()).map_err(|e| e.to_string())
    });
    match outcome {
        Ok(candidate) => table.candidates.push(candidate),
        Err(reason) => {
            tracing::warn!(row, raw = %raw, reason = %reason, "rejected input row");
            table.rejected.push(RejectedRow {
                row,
                raw,
                expected_count: count,
                correlation_key: key,
                reason,
            });
        }
    }
}

/// Write expanded rows.
pub fn write_expanded<W: Write>(writer: W, rows: &[ExpansionResult], format: TableFormat) -> Result<()> {
    write_rows(writer, rows, format).context("Failed to write expanded rows")
}

/// Write could-not-expand rows.
pub fn write_failed<W: Write>(writer: W, rows: &[FailedRow], format: TableFormat) -> Result<()> {
    write_rows(writer, rows, format).context("Failed to write could-not-expand rows")
}

fn write_rows<W: Write, T: Serialize>(mut writer: W, rows: &[T], format: TableFormat) -> Result<()> {
    match format {
        TableFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        TableFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_pandas_values() {
        assert_eq!(parse_count(""), Ok(0));
        assert_eq!(parse_count("NaN"), Ok(0));
        assert_eq!(parse_count(" 5 "), Ok(5));
        assert_eq!(parse_count("5.0"), Ok(5));
        assert_eq!(parse_count("-2"), Ok(-2));
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("two").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(TableFormat::from_path(Path::new("a/b.CSV")), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_path(Path::new("rows.json")), Some(TableFormat::Json));
        assert_eq!(TableFormat::from_path(Path::new("rows.parquet")), None);
    }

    #[test]
    fn test_push_row_rejects_negative_count() {
        let mut table = LoadedTable::default();
        push_row(&mut table, 3, "110-115".into(), "-1".into(), "k".into());
        push_row(&mut table, 4, "  ".into(), "1".into(), "k2".into());
        push_row(&mut table, 5, "110-115".into(), "2.0".into(), "k3".into());
        assert_eq!(table.candidates.len(), 1);
        assert_eq!(table.candidates[0].expected_count, 2);
        assert_eq!(table.rejected.len(), 2);
        assert_eq!(table.rejected[0].row, 3);
        assert!(table.rejected[0].reason.contains("non-negative"));
    }

    #[test]
    fn test_write_failed_csv_header() {
        let rows = vec![FailedRow {
            raw: "1805557".to_string(),
            expected_count: "1".to_string(),
            correlation_key: "so-9".to_string(),
            reason_code: "unanalyzable".to_string(),
            reason: "cannot analyze range".to_string(),
        }];
        let mut out = Vec::new();
        write_failed(&mut out, &rows, TableFormat::Csv).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("raw,expected_count,correlation_key,reason_code,reason")
        );
        assert_eq!(
            lines.next(),
            Some("1805557,1,so-9,unanalyzable,cannot analyze range")
        );
    }
}
