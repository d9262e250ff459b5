//! End-to-end decoding tests over realistic shipment rows.

use serial_decoder::*;

fn expanded_values(report: &DecodeReport) -> Vec<String> {
    report
        .expanded
        .iter()
        .map(|r| r.expanded_value.clone())
        .collect()
}

#[test]
fn test_mixed_shipment_batch() {
    let mut decoder = SerialDecoder::new(DataSource::M2m);
    let candidates = vec![
        RangeCandidate::new("180-0557-1-2b", 2, "so-100"),
        RangeCandidate::new("110-1900-12,14,17,19", 4, "so-101"),
        RangeCandidate::new("442-0002-7a-12a", 6, "so-102"),
        RangeCandidate::new("180-05578a-q", 17, "so-103"),
        RangeCandidate::new("freight", 1, "so-104"),
    ];

    let report = decoder.decode_batch(&candidates);

    assert_eq!(report.expanded.len(), 2 + 4 + 6 + 17);
    assert_eq!(report.could_not_expand.len(), 1);
    assert_eq!(report.could_not_expand[0].correlation_key.as_str(), "so-104");

    let for_key = |key: &str| -> Vec<String> {
        report
            .expanded
            .iter()
            .filter(|r| r.correlation_key.as_str() == key)
            .map(|r| r.expanded_value.clone())
            .collect()
    };
    assert_eq!(for_key("so-100"), vec!["180-0557-1b", "180-0557-2b"]);
    assert_eq!(
        for_key("so-101"),
        vec!["110-1900-12", "110-1900-14", "110-1900-17", "110-1900-19"]
    );
    assert_eq!(for_key("so-102").last().map(String::as_str), Some("442-0002-12a"));
    assert_eq!(for_key("so-103").len(), 17);
}

#[test]
fn test_session_continuation_across_rows() {
    let mut decoder = SerialDecoder::new(DataSource::M2m);

    let first = decoder.classify("110-115", 5).unwrap();
    let second = decoder.classify("110-115", 3).unwrap();

    assert_eq!(first.kind, SequenceKind::NumCount);
    assert_eq!(first.range_start(), Some(&Endpoint::numeric(1, 1)));
    assert_eq!(first.range_end(), "5");
    assert_eq!(second.range_start(), Some(&Endpoint::numeric(6, 1)));
    assert_eq!(second.range_end(), "8");
}

#[test]
fn test_classification_kind_is_stable_on_fresh_sessions() {
    let raws = [
        "180-0557-1-2b",
        "110-1900-12,14,17,19",
        "442-0002-7a-12a",
        "180-05578a-q",
        "110-115",
        "560-0152-4-8",
    ];
    for raw in raws {
        let kinds: Vec<_> = (0..3)
            .map(|_| {
                SerialDecoder::new(DataSource::M2m)
                    .classify(raw, 2)
                    .map(|c| c.kind)
            })
            .collect();
        assert!(kinds.windows(2).all(|w| w[0] == w[1]), "{}", raw);
    }
}

#[test]
fn test_alpha_run_seventeen_members() {
    let mut decoder = SerialDecoder::new(DataSource::M2m);
    let report = decoder.decode_batch(&[RangeCandidate::new("180-05578a-q", 0, 1u64)]);
    let values = expanded_values(&report);

    let expected: Vec<String> = ('a'..='q').map(|c| format!("180-05578{}", c)).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_numeric_run_members() {
    let mut decoder = SerialDecoder::new(DataSource::M2m);
    let report = decoder.decode_batch(&[RangeCandidate::new("560-0152-4-8", 5, 1u64)]);
    assert_eq!(
        expanded_values(&report),
        vec![
            "560-0152-4",
            "560-0152-5",
            "560-0152-6",
            "560-0152-7",
            "560-0152-8"
        ]
    );
}

#[test]
fn test_runaway_span_yields_nothing() {
    let mut decoder = SerialDecoder::new(DataSource::Contract);
    let report = decoder.decode_batch(&[RangeCandidate::new("560-0152-10-10010", 5, 1u64)]);
    assert!(report.expanded.is_empty());
    assert_eq!(report.could_not_expand.len(), 1);
    assert_eq!(report.could_not_expand[0].reason.code(), "runaway_span");
}

#[test]
fn test_glued_suffix_repair_end_to_end() {
    let mut decoder = SerialDecoder::new(DataSource::M2m);
    let cleaned = decoder.normalize("110-014-0AB", 2);
    let classification = decoder.classify("110-014-0AB", 2).unwrap();
    let members = decoder.expand(&classification, 2).unwrap();

    assert_eq!(cleaned, "110-014-0-A-B");
    assert_eq!(classification.kind, SequenceKind::Alpha);
    assert_eq!(members.len(), 2);
    assert!(members[0].ends_with('A'));
    assert!(members[1].ends_with('B'));
    assert_ne!(members[0], members[1]);
}

#[test]
fn test_validator_examples() {
    assert!(!is_valid_serial("bcb-180-0557-1-2b-bus"));
    assert!(is_valid_serial("180-0557-1-2"));
}

#[test]
fn test_unsupported_list_shape_is_distinct() {
    let mut decoder = SerialDecoder::new(DataSource::M2m);
    let report = decoder.decode_batch(&[RangeCandidate::new("1-2-3-4-5,6", 2, 1u64)]);
    assert_eq!(report.could_not_expand[0].reason.code(), "unsupported_shape");
}

#[test]
fn test_custom_config_limits() {
    let config = DecoderConfig::from_toml_str(
        r#"
        [limits]
        m2m_ceiling = 3
        "#,
    )
    .unwrap();
    let mut decoder = SerialDecoder::with_config(config, DataSource::M2m);
    let report = decoder.decode_batch(&[
        RangeCandidate::new("560-0152-4-8", 0, 1u64),
        RangeCandidate::new("560-0152-4-8", 5, 2u64),
    ]);

    // First row floods the tiny ceiling; the second declares five units.
    assert_eq!(report.could_not_expand.len(), 1);
    assert_eq!(report.could_not_expand[0].reason.code(), "flood_guard");
    // Session shifted the repeat to 9..=13.
    assert_eq!(
        expanded_values(&report),
        vec![
            "560-0152-9",
            "560-0152-10",
            "560-0152-11",
            "560-0152-12",
            "560-0152-13"
        ]
    );
}

#[test]
fn test_report_serializes_expanded_rows() {
    let mut decoder = SerialDecoder::new(DataSource::M2m);
    let report = decoder.decode_batch(&[RangeCandidate::new("180-0557-1-2b", 2, "k")]);
    let json = serde_json::to_value(&report.expanded).unwrap();
    assert_eq!(json[0]["expanded_value"], "180-0557-1b");
    assert_eq!(json[0]["source_raw"], "180-0557-1-2b");
    assert_eq!(json[0]["correlation_key"], "k");
}
