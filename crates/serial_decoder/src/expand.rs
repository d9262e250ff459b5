//! Range expansion
//!
//! Turns a [`Classification`] into the concrete serial numbers it stands
//! for. Every member is `prefix + token + suffix`.

use tracing::warn;

use crate::config::ExpansionLimits;
use crate::error::{DecodeError, Result, UnanalyzableReason};
use crate::letters::{index_to_letters, letter_to_index, match_case};
use crate::types::{Classification, Endpoint, RangeBounds};

/// Expand a classified range.
///
/// `ceiling` is the data-source output ceiling; a result larger than both
/// the ceiling and `expected_count` is discarded as a flood.
pub fn expand(
    classification: &Classification,
    expected_count: u32,
    limits: &ExpansionLimits,
    ceiling: usize,
) -> Result<Vec<String>> {
    let members = match &classification.bounds {
        RangeBounds::Span { start, end } => {
            let tokens = span_tokens(start, end, limits)?;
            assemble(&classification.prefix, &tokens, &classification.suffix)
        }
        RangeBounds::List { body } => list_members(
            &classification.prefix,
            body,
            &classification.suffix,
            expected_count,
            limits,
        )?,
    };

    if members.is_empty() {
        return Err(DecodeError::NoMembers);
    }

    let produced = members.len();
    if produced > ceiling && produced > expected_count as usize {
        warn!(
            prefix = %classification.prefix,
            produced,
            ceiling,
            expected_count,
            "discarding expansion above ceiling"
        );
        return Err(DecodeError::FloodGuard {
            produced,
            ceiling,
            expected: expected_count,
        });
    }

    Ok(members)
}

fn assemble(prefix: &str, tokens: &[String], suffix: &str) -> Vec<String> {
    tokens
        .iter()
        .map(|token| format!("{}{}{}", prefix, token, suffix))
        .collect()
}

fn span_tokens(start: &Endpoint, end: &Endpoint, limits: &ExpansionLimits) -> Result<Vec<String>> {
    match (start, end) {
        (
            Endpoint::Numeric {
                value: first,
                width,
            },
            Endpoint::Numeric { value: last, .. },
        ) => numeric_run(*first, *last, *width, limits.max_numeric_span),
        (Endpoint::Alpha { letters: first }, Endpoint::Alpha { letters: last }) => {
            letter_run(first, last, limits.max_alpha_span)
        }
        _ => Err(DecodeError::unanalyzable(
            UnanalyzableReason::UnrecognizedShape {
                start: start.to_string(),
                end: end.to_string(),
            },
        )),
    }
}

/// `first..=last`, zero-padded to `width`.
fn numeric_run(first: u64, last: u64, width: usize, max_span: u64) -> Result<Vec<String>> {
    if last < first {
        return Ok(Vec::new());
    }
    let span = last - first;
    if span > max_span {
        warn!(first, last, span, max_span, "numeric range too wide");
        return Err(DecodeError::RunawaySpan {
            span,
            max: max_span,
        });
    }
    Ok((first..=last)
        .map(|n| format!("{:0width$}", n, width = width))
        .collect())
}

fn letter_run(first: &str, last: &str, max_span: u64) -> Result<Vec<String>> {
    let start = letter_to_index(first).ok_or_else(|| DecodeError::malformed(first))?;
    let end = letter_to_index(last).ok_or_else(|| DecodeError::malformed(last))?;
    if end < start {
        return Ok(Vec::new());
    }

    let count = end - start + 1;
    if count >= max_span {
        warn!(first, last, count, max_span, "letter range too wide");
        return Err(DecodeError::AlphaSpanTooWide {
            count,
            max: max_span,
        });
    }

    let width = first.len().max(last.len());
    (start..=end)
        .map(|index| {
            index_to_letters(index, width)
                .map(|letters| match_case(first, &letters))
                .ok_or_else(|| DecodeError::malformed(format!("{}..{}", first, last)))
        })
        .collect()
}

/// Expand a comma list, re-slicing the prefix once if it came up short.
fn list_members(
    prefix: &str,
    body: &str,
    suffix: &str,
    expected_count: u32,
    limits: &ExpansionLimits,
) -> Result<Vec<String>> {
    let first_try = list_tokens(body, limits.max_numeric_span);
    let produced = first_try.as_ref().map(Vec::len).unwrap_or(0);
    if produced >= expected_count as usize {
        return first_try.map(|tokens| assemble(prefix, &tokens, suffix));
    }

    // One segment of the prefix may belong to the first list token:
    // `110-5-8,10` is `110-` + `5-8,10`, not `110-5-` + `8,10`.
    let retry = shift_prefix_segment(prefix, body).and_then(|(shorter, longer_body)| {
        list_tokens(&longer_body, limits.max_numeric_span)
            .ok()
            .filter(|tokens| tokens.len() > produced)
            .map(|tokens| assemble(&shorter, &tokens, suffix))
    });

    match retry {
        Some(members) => Ok(members),
        None => first_try.map(|tokens| assemble(prefix, &tokens, suffix)),
    }
}

/// Move the last prefix segment to the front of the list body.
fn shift_prefix_segment(prefix: &str, body: &str) -> Option<(String, String)> {
    let trimmed = prefix.strip_suffix('-').unwrap_or(prefix);
    let (rest, segment) = trimmed.rsplit_once('-')?;
    if segment.is_empty() {
        return None;
    }
    Some((format!("{}-", rest), format!("{}-{}", segment, body)))
}

/// Tokens of a list body: bare integers and `a-b` sub-ranges.
fn list_tokens(body: &str, max_span: u64) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    for raw_token in body.split(',') {
        let token = raw_token.trim();
        if token.is_empty() {
            continue;
        }
        match token.split_once('-') {
            Some((first, last)) => {
                let (first, width) = match Endpoint::parse_numeric(first)? {
                    Endpoint::Numeric { value, width } => (value, width),
                    Endpoint::Alpha { .. } => return Err(DecodeError::malformed(token)),
                };
                let last = Endpoint::parse_numeric(last)?
                    .as_numeric()
                    .ok_or_else(|| DecodeError::malformed(token))?;
                tokens.extend(numeric_run(first, last, width, max_span)?);
            }
            None => {
                Endpoint::parse_numeric(token)?;
                tokens.push(token.to_string());
            }
        }
    }
    Ok(tokens)
}
