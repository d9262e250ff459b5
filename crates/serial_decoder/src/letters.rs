//! Letter-index arithmetic for alphabetic serial suffixes.
//!
//! Letters are read as a bijective base-26 numeral, the way spreadsheet
//! columns are numbered: `a=1 .. z=26`, `aa=27`, `az=52`, `ba=53`. There is
//! no zero digit, so every index has exactly one spelling.

/// Convert a letter string to its 1-based index. Case-insensitive.
///
/// Returns `None` for empty input, non-letters, or values beyond `u64`.
pub fn letter_to_index(letters: &str) -> Option<u64> {
    if letters.is_empty() {
        return None;
    }
    letters.bytes().try_fold(0u64, |acc, byte| {
        if !byte.is_ascii_alphabetic() {
            return None;
        }
        let digit = u64::from(byte.to_ascii_lowercase() - b'a' + 1);
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Convert a 1-based index back to lowercase letters.
///
/// Returns `None` for index 0 or when the spelling needs more than `width`
/// letters. For every `n` in `1..=26^width` this is the exact inverse of
/// [`letter_to_index`].
pub fn index_to_letters(index: u64, width: usize) -> Option<String> {
    if index == 0 {
        return None;
    }
    let mut remaining = index;
    let mut out = Vec::new();
    while remaining > 0 {
        let digit = (remaining - 1) % 26;
        out.push(b'a' + digit as u8);
        remaining = (remaining - 1) / 26;
    }
    if out.len() > width {
        return None;
    }
    out.reverse();
    String::from_utf8(out).ok()
}

/// Render `letters` in the case of `template`: upper when the template is
/// all uppercase, lower otherwise.
pub fn match_case(template: &str, letters: &str) -> String {
    let upper = !template.is_empty() && template.bytes().all(|b| b.is_ascii_uppercase());
    if upper {
        letters.to_ascii_uppercase()
    } else {
        letters.to_ascii_lowercase()
    }
}

/// True when `b` is the letter immediately after `a`, ignoring case.
pub fn are_consecutive(a: char, b: char) -> bool {
    if !a.is_ascii_alphabetic() || !b.is_ascii_alphabetic() {
        return false;
    }
    let a = a.to_ascii_lowercase() as u32;
    let b = b.to_ascii_lowercase() as u32;
    b == a + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(letter_to_index("a"), Some(1));
        assert_eq!(letter_to_index("Q"), Some(17));
        assert_eq!(letter_to_index("z"), Some(26));
    }

    #[test]
    fn test_multi_letter_positions() {
        assert_eq!(letter_to_index("aa"), Some(27));
        assert_eq!(letter_to_index("az"), Some(52));
        assert_eq!(letter_to_index("ba"), Some(53));
        assert_eq!(letter_to_index("zz"), Some(702));
        assert_eq!(letter_to_index("aaa"), Some(703));
    }

    #[test]
    fn test_rejects_non_letters() {
        assert_eq!(letter_to_index(""), None);
        assert_eq!(letter_to_index("a1"), None);
        assert_eq!(letter_to_index("-"), None);
    }

    #[test]
    fn test_index_to_letters() {
        assert_eq!(index_to_letters(1, 1).as_deref(), Some("a"));
        assert_eq!(index_to_letters(26, 1).as_deref(), Some("z"));
        assert_eq!(index_to_letters(27, 2).as_deref(), Some("aa"));
        assert_eq!(index_to_letters(27, 1), None);
        assert_eq!(index_to_letters(0, 3), None);
    }

    #[test]
    fn test_round_trip_widths_one_to_three() {
        for width in 1..=3u32 {
            let max = 26u64.pow(width);
            for n in 1..=max {
                let letters = index_to_letters(n, width as usize)
                    .unwrap_or_else(|| panic!("no spelling for {} at width {}", n, width));
                assert_eq!(letter_to_index(&letters), Some(n), "letters {}", letters);
            }
        }
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("A", "ab"), "AB");
        assert_eq!(match_case("a", "AB"), "ab");
        assert_eq!(match_case("Ab", "c"), "c");
    }

    #[test]
    fn test_are_consecutive() {
        assert!(are_consecutive('A', 'B'));
        assert!(are_consecutive('a', 'B'));
        assert!(!are_consecutive('B', 'A'));
        assert!(!are_consecutive('z', '{'));
        assert!(!are_consecutive('1', '2'));
    }
}
