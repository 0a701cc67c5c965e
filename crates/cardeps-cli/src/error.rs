//! Error handling for the cardeps CLI.
//!
//! `CliError` is what every command returns. Failures of the analysis itself
//! arrive as [`cardeps_graph::Error`] and are wrapped unchanged, so the file
//! that caused them stays part of the message. Configuration problems carry a
//! hint on how to fix them.
//!
//! ```rust,no_run
//! use cardeps_cli::error::{Result, ResultExt};
//!
//! fn listing(units: &[String]) -> Result<String> {
//!     serde_json::to_string(units).context("Failed to serialize unit list")
//! }
//! ```

mod miette;

use std::path::PathBuf;

use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The analysis aborted
    #[error("Analysis failed: {0}")]
    Analysis(#[from] cardeps_graph::Error),

    /// Failed to write an output file
    #[error("Failed to write {}: {source}\n\nHint: Check that the output directory is writable or pass a different --out-dir", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a cardeps.toml file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Merged configuration could not be deserialized
    #[error("Invalid configuration: {0}\n\nHint: Check cardeps.toml and CARDEPS_* variables for typos and value types")]
    Extract(#[from] Box<figment::Error>),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let msg = ConfigError::NotFound(PathBuf::from("cardeps.toml")).to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("cardeps.toml"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "workers".to_string(),
            value: "0".to_string(),
            hint: "Use at least one worker".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'workers': 0"));
        assert!(msg.contains("Hint: Use at least one worker"));
    }

    #[test]
    fn test_analysis_error_keeps_file_name() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CliError = cardeps_graph::Error::Io {
            path: PathBuf::from("CarA/CarAConfigs/artifact.xml"),
            source,
        }
        .into();
        assert!(matches!(err, CliError::Analysis(_)));
        assert!(err.to_string().contains("CarA/CarAConfigs/artifact.xml"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("cardeps.toml")));
        let msg = result.context("Failed to list units").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to list units: Configuration error: "));
        assert!(msg.contains("cardeps.toml"));
    }
}
