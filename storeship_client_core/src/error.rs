//! Error types for the Storeship Client Core Library
//!
//! This module contains all error types used throughout the library, organized
//! into logical categories for better maintainability and clarity.

use thiserror::Error;

pub mod process;
pub mod remote;
pub mod validation;

pub use self::process::ProcessError;
pub use self::remote::RemoteError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Storeship Client Core Library
///
/// Errors are categorized into three main types:
/// - Remote errors: store API responses and remote-state failures
/// - Validation errors: local precondition and configuration failures
/// - Process errors: spawning and running external tools
#[derive(Error, Debug)]
pub enum Error {
    /// Remote API related errors
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// External process related errors
    #[error(transparent)]
    Process(#[from] ProcessError),
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Process(ProcessError::from_std(source))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(RemoteError::transport(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Remote(RemoteError::malformed_response(err.to_string()))
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Validation(ValidationError::invalid_configuration(&format!(
            "Failed to sign API token: {err}"
        )))
    }
}
