//! Error types for serial range decoding.

use thiserror::Error;

/// Per-row decoding result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Why a candidate's shape could not be classified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnanalyzableReason {
    /// Nothing left after normalization
    #[error("range string is empty after normalization")]
    EmptyInput,

    /// No `-` separated start/end pair to work with
    #[error("fewer than two '-' separated segments")]
    TooFewSegments,

    /// Comma list whose first chunk has a hyphen count other than 1, 2 or 3
    #[error("list with {hyphens} hyphens before the first comma is not supported")]
    UnsupportedListShape { hyphens: usize },

    /// Both endpoints alphanumeric but with different trailing letters
    #[error("endpoints '{start}' and '{end}' carry different suffixes")]
    MismatchedSuffix { start: String, end: String },

    /// Endpoint pair matches none of the known shapes
    #[error("unrecognized endpoint shape '{start}' .. '{end}'")]
    UnrecognizedShape { start: String, end: String },
}

/// Failure to decode a single candidate.
///
/// None of these abort a batch; the candidate is routed to the
/// could-not-expand set with the error as its audit reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("cannot analyze range: {0}")]
    Unanalyzable(UnanalyzableReason),

    #[error("numeric span {span} exceeds maximum {max}")]
    RunawaySpan { span: u64, max: u64 },

    #[error("letter range of {count} members exceeds maximum {max}")]
    AlphaSpanTooWide { count: u64, max: u64 },

    #[error(
        "expansion produced {produced} members, above ceiling {ceiling} and expected count {expected}"
    )]
    FloodGuard {
        produced: usize,
        ceiling: usize,
        expected: u32,
    },

    #[error("malformed token '{token}'")]
    MalformedToken { token: String },

    #[error("numeric endpoint '{value}' does not fit in 64 bits")]
    EndpointOverflow { value: String },

    #[error("range produced no members")]
    NoMembers,

    #[error("'{value}' contains a denied token")]
    DeniedToken { value: String },
}

impl DecodeError {
    /// Stable short code for audit tables.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Unanalyzable(UnanalyzableReason::UnsupportedListShape { .. }) => {
                "unsupported_shape"
            }
            DecodeError::Unanalyzable(_) => "unanalyzable",
            DecodeError::RunawaySpan { .. } => "runaway_span",
            DecodeError::AlphaSpanTooWide { .. } => "alpha_span_too_wide",
            DecodeError::FloodGuard { .. } => "flood_guard",
            DecodeError::MalformedToken { .. } => "malformed_token",
            DecodeError::EndpointOverflow { .. } => "endpoint_overflow",
            DecodeError::NoMembers => "no_members",
            DecodeError::DeniedToken { .. } => "denied_token",
        }
    }

    /// True for the anti-flood discards (span and count guards).
    pub fn is_runaway(&self) -> bool {
        matches!(
            self,
            DecodeError::RunawaySpan { .. }
                | DecodeError::AlphaSpanTooWide { .. }
                | DecodeError::FloodGuard { .. }
        )
    }

    pub(crate) fn unanalyzable(reason: UnanalyzableReason) -> Self {
        Self::Unanalyzable(reason)
    }

    pub(crate) fn malformed(token: impl Into<String>) -> Self {
        Self::MalformedToken {
            token: token.into(),
        }
    }
}

/// Caller contract violations, raised when building candidates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    #[error("range string is empty")]
    EmptyRaw,

    #[error("expected count must be non-negative, got {0}")]
    NegativeCount(i64),

    #[error("expected count {0} is too large")]
    CountOverflow(i64),

    #[error("column lengths differ: {raws} raw values, {counts} counts, {keys} keys")]
    LengthMismatch {
        raws: usize,
        counts: usize,
        keys: usize,
    },
}

/// Errors loading decoder configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
