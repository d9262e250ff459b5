//! Serial number validator.
//!
//! Shipment extracts mix real serials with freight lines, spares, test
//! units and the like. Those values are never valid serials, whatever
//! range shape they happen to have.

use crate::config::ValidatorConfig;
use crate::defaults::{DEFAULT_DENY_INFIXES, DEFAULT_DENY_SUFFIXES};

/// Deny-list validator. Tokens are stored lowercased.
#[derive(Debug, Clone)]
pub struct Validator {
    deny_infixes: Vec<String>,
    deny_suffixes: Vec<String>,
}

impl Validator {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            deny_infixes: lowercase_all(&config.deny_infixes),
            deny_suffixes: lowercase_all(&config.deny_suffixes),
        }
    }

    /// True when `value` contains no denied infix and ends with no denied
    /// suffix.
    pub fn validate(&self, value: &str) -> bool {
        let lowered = value.to_lowercase();
        self.denied_token(&lowered).is_none()
    }

    /// The first deny-list token that matches `value`, if any.
    pub fn find_denied<'a>(&'a self, value: &str) -> Option<&'a str> {
        self.denied_token(&value.to_lowercase())
    }

    fn denied_token(&self, lowered: &str) -> Option<&str> {
        self.deny_infixes
            .iter()
            .find(|token| lowered.contains(token.as_str()))
            .or_else(|| {
                self.deny_suffixes
                    .iter()
                    .find(|token| lowered.ends_with(token.as_str()))
            })
            .map(String::as_str)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}

/// Validate against the built-in deny lists.
pub fn is_valid_serial(value: &str) -> bool {
    let lowered = value.to_lowercase();
    !DEFAULT_DENY_INFIXES
        .iter()
        .any(|token| lowered.contains(*token))
        && !DEFAULT_DENY_SUFFIXES
            .iter()
            .any(|token| lowered.ends_with(*token))
}

fn lowercase_all(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
