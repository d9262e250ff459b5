//! Serial-number range decoder
//!
//! Manufacturing records write several installed units as one compact
//! range: `180-0557-1-2b`, `110-1900-12,14,17,19`, `442-0002-7a-12a`. This
//! crate expands such a range into the discrete serial numbers it stands
//! for.
//!
//! # Stages
//!
//! 1. [`normalize()`] - trim punctuation noise, repair glued `AB` suffixes
//! 2. [`classify()`] - decide the range kind (`num`, `num_count`, `list`,
//!    `alpha`) and split off fixed prefix/suffix
//! 3. [`expand()`] - enumerate members, with span and flood guards
//! 4. [`SessionState`] - continue numbering when a range string repeats
//!
//! [`Validator`] rejects freight/spare/test noise independently of range
//! expansion.
//!
//! # Example
//!
//! ```
//! use serial_decoder::{DataSource, RangeCandidate, SerialDecoder};
//!
//! let mut decoder = SerialDecoder::new(DataSource::M2m);
//! let report = decoder.decode_batch(&[
//!     RangeCandidate::new("560-0152-4-8", 5, "row-1"),
//!     RangeCandidate::new("1805557", 1, "row-2"),
//! ]);
//!
//! assert_eq!(report.expanded.len(), 5);
//! assert_eq!(report.expanded[0].expanded_value, "560-0152-4");
//! assert_eq!(report.could_not_expand.len(), 1);
//! ```
//!
//! # Threading
//!
//! A [`SerialDecoder`] is a plain single-threaded value. Every call that can
//! touch session state takes `&mut self`; share one across threads only
//! behind a lock, or partition rows by range string across decoders.

pub mod classify;
pub mod config;
pub mod decoder;
pub mod defaults;
pub mod error;
pub mod expand;
pub mod letters;
pub mod normalize;
pub mod session;
pub mod types;
pub mod validate;

pub use classify::classify;
pub use config::{DecoderConfig, ExpansionLimits, ValidatorConfig};
pub use decoder::SerialDecoder;
pub use error::{CandidateError, ConfigError, DecodeError, Result, UnanalyzableReason};
pub use expand::expand;
pub use letters::{index_to_letters, letter_to_index};
pub use normalize::normalize;
pub use session::SessionState;
pub use types::{
    Classification, CorrelationKey, CouldNotExpand, DataSource, DecodeReport, Endpoint,
    ExpansionResult, RangeBounds, RangeCandidate, SequenceKind,
};
pub use validate::{is_valid_serial, Validator};
