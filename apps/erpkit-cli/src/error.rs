//! # CLI Error Types
//!
//! Everything that can stop a command, with a process exit code per family.
//!
//! ```text
//! ┌──────────────────────┬──────┬────────────────────────────────────────┐
//! │ Family               │ Exit │ Variants                               │
//! ├──────────────────────┼──────┼────────────────────────────────────────┤
//! │ Conflicts found      │ 2    │ ConflictsFound                         │
//! │ Configuration        │ 3    │ InvalidConfig, ConfigLoad, ConfigSave  │
//! │ Input                │ 4    │ InvalidInput, Core                     │
//! │ I/O                  │ 5    │ Io                                     │
//! └──────────────────────┴──────┴────────────────────────────────────────┘
//! ```

use erpkit_core::{CodeError, CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Values in the config are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoad(String),

    /// Config file could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSave(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Input JSON or arguments are unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Domain rule rejected the input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The check ran and found conflicts; the report was already printed.
    #[error("{0} conflict(s) found")]
    ConflictsFound(usize),

    // =========================================================================
    // I/O Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CodeError> for CliError {
    fn from(err: CodeError) -> Self {
        CliError::Core(CoreError::Code(err))
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(CoreError::Validation(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::InvalidInput(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoad(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::ConfigSave(err.to_string())
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ConflictsFound(_) => 2,
            CliError::InvalidConfig(_) | CliError::ConfigLoad(_) | CliError::ConfigSave(_) => 3,
            CliError::InvalidInput(_) | CliError::Core(_) => 4,
            CliError::Io(_) => 5,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        self.exit_code() == 3
    }
}
