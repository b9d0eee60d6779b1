//! services/client/src/error.rs
//!
//! Defines the primary error type for the client binary.

use crate::config::ConfigError;

/// The primary error type for the `client` service.
///
/// API failures are not in here: they are outcomes the screens render, not
/// errors that abort the program.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure while reading input from the terminal.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
