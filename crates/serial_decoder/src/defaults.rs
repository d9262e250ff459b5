//! Canonical default values for decoding limits and validator lists.

/// Expansion ceiling for general shipment (m2m) data.
pub const DEFAULT_M2M_CEILING: usize = 100;
/// Expansion ceiling for contract-sourced data.
pub const DEFAULT_CONTRACT_CEILING: usize = 150;
/// Widest numeric run accepted before a range is treated as corrupt.
pub const DEFAULT_MAX_NUMERIC_SPAN: u64 = 150;
/// Letter runs with this many members or more are rejected.
pub const DEFAULT_MAX_ALPHA_SPAN: u64 = 100;

/// Characters trimmed from both ends of a raw range string.
pub const DEFAULT_STRIP_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ ";

/// Substrings that mark a value as shipping/manufacturing noise.
pub const DEFAULT_DENY_INFIXES: &[&str] = &[
    "freight",
    "test",
    "spare",
    "crate",
    "sample",
    "demo",
    "rental",
    "loaner",
    "repair",
    "warranty",
    "return",
    "rma",
    "scrap",
    "dummy",
    "temp",
    "tbd",
    "unknown",
    "n/a",
    "none",
    "various",
    "multiple",
    "parts",
    "refurb",
    "shipping",
    "pallet",
    "packaging",
    "label",
    "quote",
    "manual",
    "consign",
];

/// Trailing tokens that mark a value as a non-serial line item.
pub const DEFAULT_DENY_SUFFIXES: &[&str] = &["bus", "rpp", "misc", "kit", "svc", "pts"];
