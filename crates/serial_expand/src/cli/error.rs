//! Helpful error types for CLI commands
//!
//! Every error carries what went wrong, optional context, and suggestions.

use std::fmt;
use std::path::Path;

/// An error with context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    /// Input file does not exist
    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                format!(
                    "TRY: Look for similar files: ls {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| ".".to_string())
                ),
            ])
    }

    /// Input extension is neither csv nor json and no --format was given
    pub fn unknown_table_format(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(no extension)");
        Self::new(format!("Unknown table format: {}", ext))
            .with_context(format!("Cannot read candidates from {}", path.display()))
            .with_suggestions([
                "TRY: Pass --format csv or --format json".to_string(),
                "TRY: Supported extensions: .csv, .json".to_string(),
            ])
    }

    /// Configuration file failed to load
    pub fn invalid_config(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid configuration: {}", details))
            .with_context(format!("Failed to load {}", path.display()))
            .with_suggestions([
                "TRY: Print the defaults: serial-expand config".to_string(),
                "TRY: Ceilings and spans must be greater than zero".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While reading candidates")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While reading candidates"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_unknown_table_format() {
        let err = HelpfulError::unknown_table_format(&PathBuf::from("rows.parquet"));
        let display = format!("{}", err);
        assert!(display.contains("parquet"));
        assert!(display.contains("--format"));
    }
}
