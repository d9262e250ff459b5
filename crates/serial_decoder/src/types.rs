//! Core data model: candidates, classifications and expansion rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CandidateError, DecodeError};

// ============================================================================
// Correlation keys
// ============================================================================

/// Opaque key carried from a candidate to every row it produces.
///
/// The decoder never interprets it; callers use it to re-join results with
/// the source table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationKey(String);

impl CorrelationKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! correlation_key_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CorrelationKey {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

correlation_key_from!(&str, String, &String, u32, u64, i32, i64, usize);

// ============================================================================
// Data source
// ============================================================================

/// Which upstream table a batch came from; selects the expansion ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// General shipment / install records
    #[default]
    M2m,
    /// Service contract records
    Contract,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::M2m => "m2m",
            DataSource::Contract => "contract",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m2m" => Ok(DataSource::M2m),
            "contract" => Ok(DataSource::Contract),
            other => Err(format!(
                "Unknown data source '{}' (expected 'm2m' or 'contract')",
                other
            )),
        }
    }
}

// ============================================================================
// Candidates
// ============================================================================

/// One row to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCandidate {
    /// Original range token, e.g. `442-0002-7a-12a`
    pub raw: String,
    /// Units shipped; 0 means unknown
    pub expected_count: u32,
    /// Carried through untouched
    pub correlation_key: CorrelationKey,
}

impl RangeCandidate {
    pub fn new(
        raw: impl Into<String>,
        expected_count: u32,
        correlation_key: impl Into<CorrelationKey>,
    ) -> Self {
        Self {
            raw: raw.into(),
            expected_count,
            correlation_key: correlation_key.into(),
        }
    }

    /// Build a candidate from loosely typed upstream values.
    ///
    /// Rejects blank range strings and negative counts.
    pub fn try_new(
        raw: impl Into<String>,
        expected_count: i64,
        correlation_key: impl Into<CorrelationKey>,
    ) -> Result<Self, CandidateError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CandidateError::EmptyRaw);
        }
        if expected_count < 0 {
            return Err(CandidateError::NegativeCount(expected_count));
        }
        let expected_count = u32::try_from(expected_count)
            .map_err(|_| CandidateError::CountOverflow(expected_count))?;
        Ok(Self::new(raw, expected_count, correlation_key))
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Shape of a range string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    /// Numeric start and end
    Num,
    /// No end marker; member count comes from the expected count
    NumCount,
    /// Comma-separated tokens, possibly with `a-b` sub-ranges
    List,
    /// Letter start and end
    Alpha,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Num => write!(f, "num"),
            SequenceKind::NumCount => write!(f, "num_count"),
            SequenceKind::List => write!(f, "list"),
            SequenceKind::Alpha => write!(f, "alpha"),
        }
    }
}

/// One end of a span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// Integer endpoint; `width` is the digit count as written, so `04`
    /// keeps its leading zero when rendered.
    Numeric { value: u64, width: usize },
    /// Letter endpoint in base-26 column notation
    Alpha { letters: String },
}

impl Endpoint {
    pub fn numeric(value: u64, width: usize) -> Self {
        Endpoint::Numeric { value, width }
    }

    pub fn alpha(letters: impl Into<String>) -> Self {
        Endpoint::Alpha {
            letters: letters.into(),
        }
    }

    /// Parse an all-digit string, remembering how many digits it had.
    pub fn parse_numeric(text: &str) -> Result<Self, DecodeError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::malformed(text));
        }
        let value = text
            .parse::<u64>()
            .map_err(|_| DecodeError::EndpointOverflow {
                value: text.to_string(),
            })?;
        Ok(Endpoint::numeric(value, text.len()))
    }

    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            Endpoint::Numeric { value, .. } => Some(*value),
            Endpoint::Alpha { .. } => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Numeric { value, width } => write!(f, "{:0width$}", value, width = width),
            Endpoint::Alpha { letters } => f.write_str(letters),
        }
    }
}

/// The variable part of a classified range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBounds {
    /// `start..=end`
    Span { start: Endpoint, end: Endpoint },
    /// Raw comma list body, e.g. `12,14,17-19`
    List { body: String },
}

/// Output of the classifier for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: SequenceKind,
    /// Fixed text before every generated token, separator included
    pub prefix: String,
    /// Fixed text after every generated token
    pub suffix: String,
    pub bounds: RangeBounds,
}

impl Classification {
    pub fn range_start(&self) -> Option<&Endpoint> {
        match &self.bounds {
            RangeBounds::Span { start, .. } => Some(start),
            RangeBounds::List { .. } => None,
        }
    }

    /// Range end as text: the end endpoint, or the list body for lists.
    pub fn range_end(&self) -> String {
        match &self.bounds {
            RangeBounds::Span { end, .. } => end.to_string(),
            RangeBounds::List { body } => body.clone(),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// One generated serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionResult {
    /// `prefix + token + suffix`
    pub expanded_value: String,
    /// The candidate's original raw string
    pub source_raw: String,
    pub correlation_key: CorrelationKey,
}

/// A candidate that produced nothing, kept for manual audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouldNotExpand {
    pub raw: String,
    pub expected_count: u32,
    pub correlation_key: CorrelationKey,
    pub reason: DecodeError,
}

/// Both result sets of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub expanded: Vec<ExpansionResult>,
    pub could_not_expand: Vec<CouldNotExpand>,
}

impl DecodeReport {
    /// Could-not-expand rows discarded by the anti-flood guards.
    pub fn runaway_count(&self) -> usize {
        self.could_not_expand
            .iter()
            .filter(|row| row.reason.is_runaway())
            .count()
    }

    pub fn merge(&mut self, other: DecodeReport) {
        self.expanded.extend(other.expanded);
        self.could_not_expand.extend(other.could_not_expand);
    }
}
