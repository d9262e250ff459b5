//! Decoder configuration
//!
//! Every knob the surrounding pipeline used to hold in global config is an
//! explicit value here. All fields have defaults, so a TOML file only needs
//! the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::defaults::{
    DEFAULT_CONTRACT_CEILING, DEFAULT_DENY_INFIXES, DEFAULT_DENY_SUFFIXES, DEFAULT_M2M_CEILING,
    DEFAULT_MAX_ALPHA_SPAN, DEFAULT_MAX_NUMERIC_SPAN, DEFAULT_STRIP_CHARS,
};
use crate::error::ConfigError;
use crate::types::DataSource;

/// Main configuration for a decoder instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Characters trimmed from both ends of raw strings
    #[serde(default = "default_strip_chars")]
    pub strip_chars: String,

    /// Expansion size guards
    #[serde(default)]
    pub limits: ExpansionLimits,

    /// Deny lists for the serial validator
    #[serde(default)]
    pub validator: ValidatorConfig,
}

/// Guards against ranges that would flood the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionLimits {
    /// Ceiling for shipment (m2m) data
    #[serde(default = "default_m2m_ceiling")]
    pub m2m_ceiling: usize,

    /// Ceiling for contract data
    #[serde(default = "default_contract_ceiling")]
    pub contract_ceiling: usize,

    /// Largest `end - start` accepted for numeric runs
    #[serde(default = "default_max_numeric_span")]
    pub max_numeric_span: u64,

    /// Letter runs with at least this many members are rejected
    #[serde(default = "default_max_alpha_span")]
    pub max_alpha_span: u64,
}

/// Validator deny lists. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Reject when any of these appears anywhere
    #[serde(default = "default_deny_infixes")]
    pub deny_infixes: Vec<String>,

    /// Reject when the value ends with any of these
    #[serde(default = "default_deny_suffixes")]
    pub deny_suffixes: Vec<String>,
}

fn default_strip_chars() -> String {
    DEFAULT_STRIP_CHARS.to_string()
}

fn default_m2m_ceiling() -> usize {
    DEFAULT_M2M_CEILING
}

fn default_contract_ceiling() -> usize {
    DEFAULT_CONTRACT_CEILING
}

fn default_max_numeric_span() -> u64 {
    DEFAULT_MAX_NUMERIC_SPAN
}

fn default_max_alpha_span() -> u64 {
    DEFAULT_MAX_ALPHA_SPAN
}

fn default_deny_infixes() -> Vec<String> {
    DEFAULT_DENY_INFIXES.iter().map(|s| s.to_string()).collect()
}

fn default_deny_suffixes() -> Vec<String> {
    DEFAULT_DENY_SUFFIXES.iter().map(|s| s.to_string()).collect()
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strip_chars: default_strip_chars(),
            limits: ExpansionLimits::default(),
            validator: ValidatorConfig::default(),
        }
    }
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            m2m_ceiling: default_m2m_ceiling(),
            contract_ceiling: default_contract_ceiling(),
            max_numeric_span: default_max_numeric_span(),
            max_alpha_span: default_max_alpha_span(),
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            deny_infixes: default_deny_infixes(),
            deny_suffixes: default_deny_suffixes(),
        }
    }
}

impl ExpansionLimits {
    /// Output ceiling for a batch from `source`.
    pub fn ceiling_for(&self, source: DataSource) -> usize {
        match source {
            DataSource::M2m => self.m2m_ceiling,
            DataSource::Contract => self.contract_ceiling,
        }
    }
}

impl DecoderConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and check a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DecoderConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Render as TOML (used to print the effective configuration)
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would disable every expansion.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.limits.m2m_ceiling == 0 || self.limits.contract_ceiling == 0 {
            return Err(ConfigError::Invalid(
                "expansion ceilings must be greater than zero".to_string(),
            ));
        }
        if self.limits.max_alpha_span == 0 {
            return Err(ConfigError::Invalid(
                "max_alpha_span must be greater than zero".to_string(),
            ));
        }
        if self.strip_chars.contains(|c: char| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Invalid(format!(
                "strip_chars must not contain letters or digits: {:?}",
                self.strip_chars
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.limits.ceiling_for(DataSource::M2m), 100);
        assert_eq!(config.limits.ceiling_for(DataSource::Contract), 150);
        assert_eq!(config.limits.max_numeric_span, 150);
        assert_eq!(config.limits.max_alpha_span, 100);
        assert!(config.validator.deny_suffixes.contains(&"bus".to_string()));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DecoderConfig::from_toml_str(
            r#"
            [limits]
            contract_ceiling = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.contract_ceiling, 200);
        assert_eq!(config.limits.m2m_ceiling, 100);
        assert_eq!(config.strip_chars, DEFAULT_STRIP_CHARS);
        assert_eq!(config.validator, ValidatorConfig::default());
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let err = DecoderConfig::from_toml_str("[limits]\nm2m_ceiling = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = DecoderConfig::default();
        config.validator.deny_suffixes = vec!["bus".to_string()];
        let toml_str = config.to_toml_string().unwrap();
        let parsed = DecoderConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[validator]\ndeny_infixes = [\"crate\"]").unwrap();
        let config = DecoderConfig::load(file.path()).unwrap();
        assert_eq!(config.validator.deny_infixes, vec!["crate".to_string()]);
        assert!(!config.validator.deny_suffixes.is_empty());
    }
}
