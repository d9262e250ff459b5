//! Logging setup for the `serial-expand` binary.
//!
//! Logs always go to stderr; stdout is reserved for result tables. With a
//! log directory, a daily-rolling plain-text file is written as well.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "serial_expand=info,serial_decoder=warn";
const VERBOSE_LOG_FILTER: &str = "serial_expand=debug,serial_decoder=debug";

/// Logging options taken from the command line.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    pub log_dir: Option<&'a Path>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. Keep the returned guard alive
/// until exit so the file writer flushes.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let default_filter = if config.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let mut guard = None;
    let file_layer = match config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_name = format!("{}.log", sanitize_name(config.app_name));
            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, file_guard) = tracing_appender::non_blocking(appender);
            guard = Some(file_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(filter.clone()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("serial-expand"), "serial-expand");
        assert_eq!(sanitize_name("serial expand/v2"), "serial_expand_v2");
    }
}
