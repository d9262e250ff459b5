//! Raw range string cleanup.

use crate::letters::are_consecutive;

/// Clean a raw range string before classification.
///
/// Trims `strip_chars` (and whitespace) from both ends, drops internal
/// whitespace, turns `&` into `-`, then applies the glued-suffix repair
/// when exactly two units were shipped.
pub fn normalize(raw: &str, expected_count: u32, strip_chars: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || strip_chars.contains(c));
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '&' { '-' } else { c })
        .collect();

    if expected_count == 2 {
        if let Some(repaired) = split_glued_suffix(&compact) {
            return repaired;
        }
    }
    compact
}

/// `110-014-0AB` -> `110-014-0-A-B`.
///
/// Only short strings qualify: at most 3 segments, or 4 when the last one
/// is exactly two characters. Longer letter runs are left alone.
fn split_glued_suffix(value: &str) -> Option<String> {
    let segments: Vec<&str> = value.split('-').collect();
    let (last, head_segments) = segments.split_last()?;
    let last_chars: Vec<char> = last.chars().collect();

    let shape_ok =
        segments.len() <= 3 || (segments.len() == 4 && last_chars.len() == 2);
    if !shape_ok || last_chars.len() < 2 {
        return None;
    }

    let first = last_chars[last_chars.len() - 2];
    let second = last_chars[last_chars.len() - 1];
    if !are_consecutive(first, second) {
        return None;
    }

    let remainder: String = last_chars[..last_chars.len() - 2].iter().collect();
    let mut parts: Vec<String> = head_segments.iter().map(|s| s.to_string()).collect();
    if !remainder.is_empty() {
        parts.push(remainder);
    }
    parts.push(first.to_string());
    parts.push(second.to_string());
    Some(parts.join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_STRIP_CHARS;

    fn clean(raw: &str, count: u32) -> String {
        normalize(raw, count, DEFAULT_STRIP_CHARS)
    }

    #[test]
    fn test_strips_edge_punctuation() {
        assert_eq!(clean("  (180-0557-1-2b).", 0), "180-0557-1-2b");
        assert_eq!(clean("-560-0152-4-8-", 0), "560-0152-4-8");
    }

    #[test]
    fn test_removes_internal_spaces_and_ampersands() {
        assert_eq!(clean("560 - 0152 - 4 & 8", 0), "560-0152-4-8");
    }

    #[test]
    fn test_repairs_glued_pair_when_two_shipped() {
        assert_eq!(clean("110-014-0AB", 2), "110-014-0-A-B");
        assert_eq!(clean("110-014-0-AB", 2), "110-014-0-A-B");
        assert_eq!(clean("180-0557-ab", 2), "180-0557-a-b");
    }

    #[test]
    fn test_repair_requires_count_of_two() {
        assert_eq!(clean("110-014-0AB", 3), "110-014-0AB");
        assert_eq!(clean("110-014-0AB", 0), "110-014-0AB");
    }

    #[test]
    fn test_repair_requires_consecutive_letters() {
        assert_eq!(clean("110-014-0AC", 2), "110-014-0AC");
        assert_eq!(clean("110-014-0BA", 2), "110-014-0BA");
    }

    #[test]
    fn test_repair_skips_long_strings() {
        assert_eq!(clean("110-014-7-0AB", 2), "110-014-7-0AB");
        assert_eq!(clean("1-2-3-4-AB", 2), "1-2-3-4-AB");
    }
}
