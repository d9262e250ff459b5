//! Subcommands of `serial-expand`.

pub mod classify;
pub mod config;
pub mod error;
pub mod expand;
pub mod output;
pub mod validate;

use anyhow::Result;
use serial_decoder::DecoderConfig;
use std::path::Path;

use error::HelpfulError;

/// Load `path` when given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<DecoderConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(HelpfulError::file_not_found(path).into());
            }
            DecoderConfig::load(path).map_err(|e| {
                HelpfulError::invalid_config(path, &e.to_string()).into()
            })
        }
        None => Ok(DecoderConfig::default()),
    }
}
