//! `validate` command - screen values for non-serial noise

use anyhow::Result;
use comfy_table::Color;
use std::path::PathBuf;

use serial_decoder::Validator;

use crate::cli::load_config;
use crate::cli::output::print_table_colored;

/// Arguments for the validate command
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub values: Vec<String>,
    pub config: Option<PathBuf>,
}

/// Verdict for one value; `denied` names the matching token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub value: String,
    pub denied: Option<String>,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        self.denied.is_none()
    }
}

pub fn check_values(validator: &Validator, values: &[String]) -> Vec<Verdict> {
    values
        .iter()
        .map(|value| Verdict {
            value: value.clone(),
            denied: validator.find_denied(value).map(str::to_string),
        })
        .collect()
}

/// Prints one row per value. Returns `false` when any value is invalid.
pub fn run(args: ValidateArgs) -> Result<bool> {
    let config = load_config(args.config.as_deref())?;
    let validator = Validator::new(&config.validator);
    let verdicts = check_values(&validator, &args.values);
    let all_valid = verdicts.iter().all(Verdict::is_valid);

    let rows = verdicts
        .into_iter()
        .map(|verdict| {
            let status = if verdict.is_valid() {
                ("valid".to_string(), Some(Color::Green))
            } else {
                ("invalid".to_string(), Some(Color::Red))
            };
            vec![
                (verdict.value, None),
                status,
                (verdict.denied.unwrap_or_default(), None),
            ]
        })
        .collect();
    print_table_colored(&["value", "status", "denied token"], rows);

    Ok(all_valid)
}
