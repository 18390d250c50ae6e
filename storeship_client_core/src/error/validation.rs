//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// A credential blob could not be read
    #[error("Invalid credential material: {message}")]
    InvalidCredential { message: String },
}

impl ValidationError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid credential error
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::InvalidCredential {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_error() {
        let error = ValidationError::invalid_configuration("team_id is required");
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("team_id"));
    }

    #[test]
    fn test_missing_field_error() {
        let error = ValidationError::missing_field("profile_id");
        assert!(error.to_string().contains("Missing required field"));
        assert!(error.to_string().contains("profile_id"));
    }

    #[test]
    fn test_invalid_parameter_error() {
        let error = ValidationError::invalid_parameter("bundle_identifier", "must not be empty");
        assert!(error.to_string().contains("bundle_identifier"));
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_invalid_credential_error() {
        let error = ValidationError::invalid_credential("bad p12 password");
        assert!(error.to_string().contains("Invalid credential material"));
    }
}
