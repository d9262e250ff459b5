//! File round trips through the expand command.

use serial_decoder::DataSource;
use serial_expand::cli::expand::{run, ExpandArgs};
use serial_expand::io::{read_candidates, ColumnNames, TableFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn args(input: &Path, dir: &TempDir) -> ExpandArgs {
    ExpandArgs {
        input: input.to_path_buf(),
        source: DataSource::M2m,
        config: None,
        expanded_out: Some(dir.path().join("expanded.out")),
        failed_out: None,
        format: None,
        columns: ColumnNames::default(),
        validate: false,
    }
}

#[test]
fn test_expand_csv_writes_both_tables() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("shipments.csv");
    fs::write(
        &input,
        "raw,expected_count,key\n\
         180-0557-1-2b,2,so-1\n\
         560-0152-4-8,5.0,so-2\n\
         1805557,,so-3\n\
         110-115,-1,so-4\n",
    )
    .unwrap();

    let summary = run(args(&input, &dir)).unwrap();

    assert_eq!(summary.candidates, 3);
    assert_eq!(summary.rejected_rows, 1);
    assert_eq!(summary.expanded, 7);
    assert_eq!(summary.could_not_expand, 2);
    assert_eq!(
        summary.failed_path,
        dir.path().join("shipments_could_not_expand.csv")
    );

    let expanded = fs::read_to_string(dir.path().join("expanded.out")).unwrap();
    let mut lines = expanded.lines();
    assert_eq!(lines.next(), Some("expanded_value,source_raw,correlation_key"));
    assert_eq!(lines.next(), Some("180-0557-1b,180-0557-1-2b,so-1"));
    assert_eq!(expanded.lines().count(), 8);

    let failed = fs::read_to_string(&summary.failed_path).unwrap();
    assert!(failed.contains("so-4,invalid_input"));
    assert!(failed.contains("so-3,unanalyzable"));
}

#[test]
fn test_expand_json_with_validation() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rows.json");
    fs::write(
        &input,
        r#"[
            {"raw": "180-0557-1-2", "expected_count": 2, "key": 10},
            {"raw": "bcb-180-0557-1-2b-bus", "expected_count": 2, "key": 11},
            {"raw": 1805557, "expected_count": null, "key": 12}
        ]"#,
    )
    .unwrap();

    let mut expand_args = args(&input, &dir);
    expand_args.validate = true;
    expand_args.failed_out = Some(dir.path().join("failed.json"));
    let summary = run(expand_args).unwrap();

    assert_eq!(summary.expanded, 2);
    assert_eq!(summary.could_not_expand, 2);

    let expanded: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("expanded.out")).unwrap())
            .unwrap();
    assert_eq!(expanded[0]["expanded_value"], "180-0557-1");
    assert_eq!(expanded[1]["correlation_key"], "10");

    let failed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("failed.json")).unwrap())
            .unwrap();
    let codes: Vec<&str> = failed
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["reason_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["invalid_input", "denied_token"]);
}

#[test]
fn test_custom_columns_and_missing_key_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.csv");
    fs::write(&input, "serial_range,qty\n560-0152-4-5,2\n").unwrap();

    let columns = ColumnNames {
        raw: "serial_range".to_string(),
        count: "qty".to_string(),
        key: "order".to_string(),
    };
    let table = read_candidates(&input, TableFormat::Csv, &columns).unwrap();
    assert_eq!(table.candidates.len(), 1);
    assert_eq!(table.candidates[0].expected_count, 2);
    assert_eq!(table.candidates[0].correlation_key.as_str(), "1");
}

#[test]
fn test_missing_raw_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.csv");
    fs::write(&input, "serial,qty\n560-0152-4-5,2\n").unwrap();

    let err = read_candidates(&input, TableFormat::Csv, &ColumnNames::default()).unwrap_err();
    assert!(err.to_string().contains("Column 'raw' not found"));
}

#[test]
fn test_unknown_extension_needs_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.txt");
    fs::write(&input, "raw\n560-0152-4-5\n").unwrap();

    let err = run(args(&input, &dir)).unwrap_err();
    assert!(err.to_string().contains("Unknown table format"));

    let mut with_format = args(&input, &dir);
    with_format.format = Some(TableFormat::Csv);
    let summary = run(with_format).unwrap();
    assert_eq!(summary.expanded, 2);
}
