//! Output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;

/// Helper for formatting and printing output.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Print a serializable value in the configured format.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let output = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        println!("{}", output);
        Ok(())
    }

    /// Print a warning to stderr unless quiet mode is on.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("Warning: {}", message);
        }
    }
}
