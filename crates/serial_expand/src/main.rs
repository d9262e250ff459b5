//! serial-expand - expand compact serial-number ranges in tabular extracts
//!
//! Usage:
//!   serial-expand expand shipments.csv --expanded-out serials.csv
//!   serial-expand classify 180-0557-1-2b 110-115 --count 2
//!   serial-expand validate bcb-180-0557-1-2b-bus
//!   serial-expand config > serial_decoder.toml

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use serial_decoder::DataSource;
use serial_expand::cli::{classify, config, expand, validate};
use serial_expand::io::{ColumnNames, TableFormat};
use serial_expand::logging::{init_logging, LogConfig};

#[derive(Parser, Debug)]
#[command(
    name = "serial-expand",
    version,
    about = "Expand compact serial-number ranges into discrete serials"
)]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Also write daily-rolling log files to this directory
    #[arg(long, global = true, env = "SERIAL_EXPAND_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a candidate table into expanded and could-not-expand tables
    Expand {
        /// Candidate table (.csv or .json)
        input: PathBuf,

        /// Data source; selects the output ceiling
        #[arg(short, long, default_value = "m2m")]
        source: DataSource,

        /// Decoder configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Expanded table path (stdout when omitted)
        #[arg(short = 'o', long)]
        expanded_out: Option<PathBuf>,

        /// Could-not-expand table path
        #[arg(long)]
        failed_out: Option<PathBuf>,

        /// Table format (inferred from the input extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<TableFormat>,

        /// Column holding the range string
        #[arg(long, default_value = "raw")]
        raw_column: String,

        /// Column holding the expected unit count
        #[arg(long, default_value = "expected_count")]
        count_column: String,

        /// Column holding the correlation key (row number when absent)
        #[arg(long, default_value = "key")]
        key_column: String,

        /// Reject freight/spare/test noise before decoding
        #[arg(long)]
        validate: bool,
    },

    /// Show how range strings are classified and expanded
    Classify {
        /// Range strings, decoded in order on one session
        #[arg(required = true)]
        values: Vec<String>,

        /// Expected unit count for every value
        #[arg(short = 'n', long, default_value = "0")]
        count: u32,

        #[arg(short, long, default_value = "m2m")]
        source: DataSource,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check values against the deny lists (exit code 1 if any is invalid)
    Validate {
        #[arg(required = true)]
        values: Vec<String>,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective decoder configuration as TOML
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "serial-expand",
        verbose: cli.verbose,
        log_dir: cli.log_dir.as_deref(),
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:?}", err);
            None
        }
    };

    match run_command(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

/// Run one subcommand. `Ok(false)` means a clean run with a failing verdict.
fn run_command(command: Commands) -> Result<bool> {
    match command {
        Commands::Expand {
            input,
            source,
            config,
            expanded_out,
            failed_out,
            format,
            raw_column,
            count_column,
            key_column,
            validate,
        } => {
            expand::run(expand::ExpandArgs {
                input,
                source,
                config,
                expanded_out,
                failed_out,
                format,
                columns: ColumnNames {
                    raw: raw_column,
                    count: count_column,
                    key: key_column,
                },
                validate,
            })?;
            Ok(true)
        }
        Commands::Classify {
            values,
            count,
            source,
            config,
        } => {
            classify::run(classify::ClassifyArgs {
                values,
                count,
                source,
                config,
            })?;
            Ok(true)
        }
        Commands::Validate { values, config } => {
            validate::run(validate::ValidateArgs { values, config })
        }
        Commands::Config { config } => {
            config::run(config::ConfigArgs { config })?;
            Ok(true)
        }
    }
}
