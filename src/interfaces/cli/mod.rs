//! CLI interface module
//!
//! Dispatches parsed commands and owns the CLI-facing error type.

pub mod commands;

use std::fmt;

use crate::cli::Commands;
use crate::errors::BeanlinkError;

#[derive(Debug)]
pub enum CliError {
    ValidationError(String),
    ConfigError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ValidationError(msg) => format!("Validation error: {}", msg),
            CliError::ConfigError(msg) => format!("Config error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ValidationError(msg) => {
                format!("{} {}", "Validation error:".yellow().bold(), msg.white())
            }
            CliError::ConfigError(msg) => {
                format!("{} {}", "Config error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<BeanlinkError> for CliError {
    fn from(err: BeanlinkError) -> Self {
        match err {
            BeanlinkError::EmptyInput(_) | BeanlinkError::NotRecognizedDomain(_) => {
                CliError::ValidationError(err.format_simple())
            }
            BeanlinkError::Config(_) => CliError::ConfigError(err.format_simple()),
            other => CliError::CommandError(other.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Convert {
            url,
            affiliate_id,
            sub_id,
            flat,
            raw_source,
            no_shorten,
            json,
        } => commands::convert_link(url, affiliate_id, sub_id, flat, raw_source, no_shorten, json),

        Commands::Caption { url, platform, json } => {
            commands::generate_caption(url, &platform, json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_cli_validation() {
        let err: CliError = BeanlinkError::empty_input("no link provided").into();
        assert!(matches!(err, CliError::ValidationError(_)));
        let err: CliError = BeanlinkError::not_recognized_domain("nope").into();
        assert!(matches!(err, CliError::ValidationError(_)));
    }

    #[test]
    fn test_other_errors_map_to_command_error() {
        let err: CliError = BeanlinkError::shortening_unavailable("timeout").into();
        assert!(matches!(err, CliError::CommandError(_)));
        let err: CliError = BeanlinkError::config("affiliate id must not be empty").into();
        assert!(matches!(err, CliError::ConfigError(_)));
    }
}
