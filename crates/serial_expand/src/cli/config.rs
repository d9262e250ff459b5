//! `config` command - print the effective decoder configuration

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::load_config;

/// Arguments for the config command
#[derive(Debug, Clone)]
pub struct ConfigArgs {
    pub config: Option<PathBuf>,
}

/// Effective configuration as TOML: the file when given, defaults otherwise.
pub fn render(args: &ConfigArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    config
        .to_toml_string()
        .context("Failed to render configuration")
}

pub fn run(args: ConfigArgs) -> Result<()> {
    print!("{}", render(&args)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_decoder::DecoderConfig;

    #[test]
    fn test_render_defaults_round_trip() {
        let text = render(&ConfigArgs { config: None }).unwrap();
        let parsed = DecoderConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.limits.m2m_ceiling, 100);
        assert_eq!(parsed.limits.contract_ceiling, 150);
    }
}
