//! Decoding session: normalize, classify and expand rows in order.

use tracing::{debug, info};

use crate::classify::classify;
use crate::config::DecoderConfig;
use crate::error::{CandidateError, DecodeError, Result};
use crate::expand::expand;
use crate::normalize::normalize;
use crate::session::SessionState;
use crate::types::{
    Classification, CorrelationKey, CouldNotExpand, DataSource, DecodeReport, ExpansionResult,
    RangeCandidate,
};
use crate::validate::Validator;

/// A decoding session over one batch (or several batches that must share
/// continuation numbering).
///
/// Holds the [`SessionState`] cache, so a repeated range string continues
/// where its previous occurrence stopped. Construct a fresh decoder when
/// that continuation must not carry over.
#[derive(Debug, Clone)]
pub struct SerialDecoder {
    config: DecoderConfig,
    source: DataSource,
    validator: Validator,
    session: SessionState,
}

impl SerialDecoder {
    /// Decoder with default limits for `source`.
    pub fn new(source: DataSource) -> Self {
        Self::with_config(DecoderConfig::default(), source)
    }

    pub fn with_config(config: DecoderConfig, source: DataSource) -> Self {
        let validator = Validator::new(&config.validator);
        Self {
            config,
            source,
            validator,
            session: SessionState::new(),
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Output ceiling in effect for this decoder's data source.
    pub fn ceiling(&self) -> usize {
        self.config.limits.ceiling_for(self.source)
    }

    /// Clean a raw string with this decoder's strip set.
    pub fn normalize(&self, raw: &str, expected_count: u32) -> String {
        normalize(raw, expected_count, &self.config.strip_chars)
    }

    /// Normalize then classify. Updates session state.
    pub fn classify(&mut self, raw: &str, expected_count: u32) -> Result<Classification> {
        let cleaned = self.normalize(raw, expected_count);
        classify(&cleaned, expected_count, &mut self.session)
    }

    /// Expand an existing classification under this decoder's limits.
    pub fn expand(
        &self,
        classification: &Classification,
        expected_count: u32,
    ) -> Result<Vec<String>> {
        expand(
            classification,
            expected_count,
            &self.config.limits,
            self.ceiling(),
        )
    }

    /// Full pipeline for one candidate.
    pub fn decode(&mut self, candidate: &RangeCandidate) -> Result<Vec<ExpansionResult>> {
        let classification = self.classify(&candidate.raw, candidate.expected_count)?;
        debug!(
            raw = %candidate.raw,
            kind = %classification.kind,
            "expanding candidate"
        );
        let members = self.expand(&classification, candidate.expected_count)?;
        Ok(members
            .into_iter()
            .map(|expanded_value| ExpansionResult {
                expanded_value,
                source_raw: candidate.raw.clone(),
                correlation_key: candidate.correlation_key.clone(),
            })
            .collect())
    }

    /// Like [`decode`](Self::decode), but candidates the validator rejects
    /// fail with [`DecodeError::DeniedToken`] before classification.
    pub fn decode_validated(
        &mut self,
        candidate: &RangeCandidate,
    ) -> Result<Vec<ExpansionResult>> {
        if !self.validator.validate(&candidate.raw) {
            return Err(DecodeError::DeniedToken {
                value: candidate.raw.clone(),
            });
        }
        self.decode(candidate)
    }

    /// Decode every candidate in order. A failing row never stops the batch.
    pub fn decode_batch(&mut self, candidates: &[RangeCandidate]) -> DecodeReport {
        self.run_batch(candidates, false)
    }

    /// [`decode_batch`](Self::decode_batch) with the validator applied first.
    pub fn decode_batch_validated(&mut self, candidates: &[RangeCandidate]) -> DecodeReport {
        self.run_batch(candidates, true)
    }

    /// Decode three aligned columns.
    pub fn decode_columns<R, K>(
        &mut self,
        raws: &[R],
        expected_counts: &[i64],
        keys: &[K],
    ) -> std::result::Result<DecodeReport, CandidateError>
    where
        R: AsRef<str>,
        K: Clone + Into<CorrelationKey>,
    {
        if raws.len() != expected_counts.len() || raws.len() != keys.len() {
            return Err(CandidateError::LengthMismatch {
                raws: raws.len(),
                counts: expected_counts.len(),
                keys: keys.len(),
            });
        }

        let candidates = raws
            .iter()
            .zip(expected_counts)
            .zip(keys)
            .map(|((raw, count), key)| RangeCandidate::try_new(raw.as_ref(), *count, key.clone()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(self.decode_batch(&candidates))
    }

    fn run_batch(&mut self, candidates: &[RangeCandidate], validate: bool) -> DecodeReport {
        let mut report = DecodeReport::default();

        for candidate in candidates {
            let outcome = if validate {
                self.decode_validated(candidate)
            } else {
                self.decode(candidate)
            };

            match outcome {
                Ok(rows) => report.expanded.extend(rows),
                Err(reason) => {
                    debug!(raw = %candidate.raw, reason = %reason, "could not expand");
                    report.could_not_expand.push(CouldNotExpand {
                        raw: candidate.raw.clone(),
                        expected_count: candidate.expected_count,
                        correlation_key: candidate.correlation_key.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            source = %self.source,
            candidates = candidates.len(),
            expanded = report.expanded.len(),
            could_not_expand = report.could_not_expand.len(),
            runaway = report.runaway_count(),
            "decoded batch"
        );
        report
    }
}
