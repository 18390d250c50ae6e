//! Remote store API error types

use thiserror::Error;

/// Errors reported by, or derived from, the remote store API
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The API rejected a request with a structured error envelope
    #[error("Store API error ({status}): {title}{}", detail.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    Api {
        status: u16,
        /// Machine-readable error code when the envelope carried one
        code: Option<String>,
        title: String,
        detail: Option<String>,
    },

    /// The API answered with something that was not the expected shape
    #[error("Malformed store API response: {message}")]
    MalformedResponse { message: String },

    /// No profile with the requested id exists for the bundle identifier
    #[error(
        "Failed to find profile for bundle identifier \"{bundle_identifier}\" with profile id \"{profile_id}\""
    )]
    ProfileNotFound {
        bundle_identifier: String,
        profile_id: String,
    },

    /// No certificate matched the requested serial number
    #[error("No distribution certificate with serial number {serial_number} found on this team")]
    CertificateNotFound { serial_number: String },

    /// The bundle identifier is not registered on this team
    #[error("Bundle identifier \"{bundle_identifier}\" is not registered on this team")]
    BundleIdNotFound { bundle_identifier: String },

    /// The remote state contradicts what a just-completed mutation guarantees
    #[error("Remote state is inconsistent: {message}")]
    Inconsistent { message: String },

    /// Transport-level failure talking to the API
    #[error("Store API request failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },
}

impl RemoteError {
    /// Create a profile not found error
    pub fn profile_not_found(bundle_identifier: &str, profile_id: &str) -> Self {
        Self::ProfileNotFound {
            bundle_identifier: bundle_identifier.to_string(),
            profile_id: profile_id.to_string(),
        }
    }

    /// Create a certificate not found error
    pub fn certificate_not_found(serial_number: &str) -> Self {
        Self::CertificateNotFound {
            serial_number: serial_number.to_string(),
        }
    }

    /// Create a bundle identifier not found error
    pub fn bundle_id_not_found(bundle_identifier: &str) -> Self {
        Self::BundleIdNotFound {
            bundle_identifier: bundle_identifier.to_string(),
        }
    }

    /// Create a remote inconsistency error
    pub fn inconsistent(message: &str) -> Self {
        Self::Inconsistent {
            message: message.to_string(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }

    /// The structured error code, when the API supplied one
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
