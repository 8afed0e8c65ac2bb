//! Error types for the I/O seams around the sizing engine.

use thiserror::Error;

use crate::config::ConfigError;

/// Failure while loading a scenario or writing its outputs.
#[derive(Debug, Error)]
pub enum SizerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure of an advisory text generator.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory credentials missing: environment variable {0} is not set")]
    MissingCredentials(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("advisory service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("advisory service returned no text")]
    EmptyResponse,

    #[error("cannot decode advisory response: {0}")]
    Decode(String),
}
