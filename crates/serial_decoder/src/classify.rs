//! Sequence classifier
//!
//! Decides which kind of range a normalized string encodes and splits it
//! into fixed prefix, variable bounds and fixed suffix.
//!
//! # Priority
//!
//! 1. Two `-` segments and no comma: a count-only base (`110-115`), numbered
//!    from the session.
//! 2. Any comma: a list (`110-1900-12,14,17-19`).
//! 3. Otherwise the last two segments are the endpoints and their shapes
//!    pick `num` or `alpha`:
//!
//! | start      | end        | result                                  |
//! |------------|------------|-----------------------------------------|
//! | letters    | letters    | alpha                                   |
//! | digits     | digits     | num                                     |
//! | digits     | `12b`      | num, `b` becomes the suffix             |
//! | `05578a`   | letters    | alpha, `05578` joins the prefix         |
//! | `7a`       | `12a`      | num with shared suffix `a`              |
//!
//! Everything else is unanalyzable.

use tracing::debug;

use crate::error::{DecodeError, Result, UnanalyzableReason};
use crate::session::SessionState;
use crate::types::{Classification, Endpoint, RangeBounds, SequenceKind};

/// Classify a normalized range string.
///
/// Updates `session` for `num` and `num_count` shapes so repeated strings
/// continue their numbering.
pub fn classify(
    value: &str,
    expected_count: u32,
    session: &mut SessionState,
) -> Result<Classification> {
    let key = canonical_key(value);
    if key.is_empty() {
        return Err(DecodeError::unanalyzable(UnanalyzableReason::EmptyInput));
    }

    let segments: Vec<&str> = key.split('-').collect();
    let has_comma = key.contains(',');

    if segments.len() == 2 && !has_comma {
        let (start, end) = session.allocate_count(&key, u64::from(expected_count));
        debug!(key = %key, start, end, "num_count range");
        return Ok(Classification {
            kind: SequenceKind::NumCount,
            prefix: format!("{}-", key),
            suffix: String::new(),
            bounds: RangeBounds::Span {
                start: Endpoint::numeric(start, 1),
                end: Endpoint::numeric(end, 1),
            },
        });
    }

    if segments.len() < 2 {
        return Err(DecodeError::unanalyzable(
            UnanalyzableReason::TooFewSegments,
        ));
    }

    if has_comma {
        return classify_list(&key);
    }

    let (head, tail) = segments.split_at(segments.len() - 2);
    let prefix = format!("{}-", head.join("-"));
    let shape = infer_shape(prefix, tail[0], tail[1])?;
    build_classification(&key, shape, session)
}

/// Replace `/` with `-` and collapse runs of `-`.
pub fn canonical_key(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        let ch = if ch == '/' { '-' } else { ch };
        if ch == '-' && out.ends_with('-') {
            continue;
        }
        out.push(ch);
    }
    out
}

fn classify_list(key: &str) -> Result<Classification> {
    let (first, rest) = match key.split_once(',') {
        Some(parts) => parts,
        None => (key, ""),
    };

    let hyphens = first.matches('-').count();
    let (prefix, head) = match hyphens {
        1 | 2 => match first.rsplit_once('-') {
            Some((prefix, head)) => (prefix.to_string(), head.to_string()),
            None => unsupported_list(hyphens)?,
        },
        3 => {
            let split = first
                .rsplit_once('-')
                .and_then(|(before, last)| before.rsplit_once('-').map(|(p, mid)| (p, mid, last)));
            match split {
                Some((prefix, mid, last)) => (prefix.to_string(), format!("{}-{}", mid, last)),
                None => unsupported_list(hyphens)?,
            }
        }
        other => {
            debug!(key = %key, hyphens = other, "unsupported list shape");
            return Err(DecodeError::unanalyzable(
                UnanalyzableReason::UnsupportedListShape { hyphens: other },
            ));
        }
    };

    let body = if rest.is_empty() {
        head
    } else {
        format!("{},{}", head, rest)
    };

    debug!(key = %key, prefix = %prefix, body = %body, "list range");
    Ok(Classification {
        kind: SequenceKind::List,
        prefix: format!("{}-", prefix),
        suffix: String::new(),
        bounds: RangeBounds::List { body },
    })
}

fn unsupported_list(hyphens: usize) -> Result<(String, String)> {
    Err(DecodeError::unanalyzable(
        UnanalyzableReason::UnsupportedListShape { hyphens },
    ))
}

/// Endpoint text after shape inference, before numeric parsing.
#[derive(Debug)]
struct Shape {
    kind: SequenceKind,
    prefix: String,
    suffix: String,
    start: String,
    end: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Letters,
    Digits,
    Mixed,
    Other,
}

fn token_class(token: &str) -> TokenClass {
    if token.is_empty() {
        return TokenClass::Other;
    }
    let mut letters = false;
    let mut digits = false;
    for byte in token.bytes() {
        if byte.is_ascii_alphabetic() {
            letters = true;
        } else if byte.is_ascii_digit() {
            digits = true;
        } else {
            return TokenClass::Other;
        }
    }
    match (letters, digits) {
        (true, false) => TokenClass::Letters,
        (false, true) => TokenClass::Digits,
        _ => TokenClass::Mixed,
    }
}

/// Split `12ab` into (`12`, `ab`). Both parts must be non-empty.
fn split_digits_letters(token: &str) -> Option<(&str, &str)> {
    let idx = token.find(|c: char| !c.is_ascii_digit())?;
    let (digits, letters) = token.split_at(idx);
    if digits.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some((digits, letters))
}

/// Split off the trailing non-digit run: `7a` -> (`7`, `a`).
fn split_trailing_suffix(token: &str) -> (&str, &str) {
    let idx = token
        .rfind(|c: char| c.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    token.split_at(idx)
}

fn infer_shape(prefix: String, start: &str, end: &str) -> Result<Shape> {
    let unrecognized = || {
        DecodeError::unanalyzable(UnanalyzableReason::UnrecognizedShape {
            start: start.to_string(),
            end: end.to_string(),
        })
    };

    match (token_class(start), token_class(end)) {
        (TokenClass::Letters, TokenClass::Letters) => Ok(Shape {
            kind: SequenceKind::Alpha,
            prefix,
            suffix: String::new(),
            start: start.to_string(),
            end: end.to_string(),
        }),
        (TokenClass::Digits, TokenClass::Digits) => Ok(Shape {
            kind: SequenceKind::Num,
            prefix,
            suffix: String::new(),
            start: start.to_string(),
            end: end.to_string(),
        }),
        (TokenClass::Digits, TokenClass::Mixed) => {
            let (end_digits, end_letters) = split_digits_letters(end).ok_or_else(unrecognized)?;
            Ok(Shape {
                kind: SequenceKind::Num,
                prefix,
                suffix: end_letters.to_string(),
                start: start.to_string(),
                end: end_digits.to_string(),
            })
        }
        (TokenClass::Mixed, TokenClass::Letters) => {
            let (start_digits, start_letters) =
                split_digits_letters(start).ok_or_else(unrecognized)?;
            Ok(Shape {
                kind: SequenceKind::Alpha,
                prefix: format!("{}{}", prefix, start_digits),
                suffix: String::new(),
                start: start_letters.to_string(),
                end: end.to_string(),
            })
        }
        (TokenClass::Mixed, TokenClass::Mixed) => {
            let (start_head, start_suffix) = split_trailing_suffix(start);
            let (end_head, end_suffix) = split_trailing_suffix(end);
            if start_suffix != end_suffix {
                return Err(DecodeError::unanalyzable(
                    UnanalyzableReason::MismatchedSuffix {
                        start: start.to_string(),
                        end: end.to_string(),
                    },
                ));
            }
            if token_class(start_head) != TokenClass::Digits
                || token_class(end_head) != TokenClass::Digits
            {
                return Err(unrecognized());
            }
            Ok(Shape {
                kind: SequenceKind::Num,
                prefix,
                suffix: start_suffix.to_string(),
                start: start_head.to_string(),
                end: end_head.to_string(),
            })
        }
        _ => Err(unrecognized()),
    }
}

fn build_classification(
    key: &str,
    shape: Shape,
    session: &mut SessionState,
) -> Result<Classification> {
    let bounds = match shape.kind {
        SequenceKind::Alpha => RangeBounds::Span {
            start: Endpoint::alpha(shape.start),
            end: Endpoint::alpha(shape.end),
        },
        _ => {
            let (start, start_width) = numeric_parts(&shape.start)?;
            let (end, _) = numeric_parts(&shape.end)?;
            let (start, end) = session.place_span(key, start, end);
            RangeBounds::Span {
                start: Endpoint::numeric(start, start_width),
                end: Endpoint::numeric(end, start_width),
            }
        }
    };

    debug!(key = %key, kind = %shape.kind, prefix = %shape.prefix, suffix = %shape.suffix, "classified range");
    Ok(Classification {
        kind: shape.kind,
        prefix: shape.prefix,
        suffix: shape.suffix,
        bounds,
    })
}

fn numeric_parts(text: &str) -> Result<(u64, usize)> {
    match Endpoint::parse_numeric(text)? {
        Endpoint::Numeric { value, width } => Ok((value, width)),
        Endpoint::Alpha { .. } => Err(DecodeError::malformed(text)),
    }
}
