//! Backend strategy for provisioning-profile operations
//!
//! The dual code path (typed store API vs. legacy scripted tool) is modeled
//! as one trait with two implementations, selected once at startup. No
//! operation branches on the flag itself.

use async_trait::async_trait;

use crate::ClientConfig;
use crate::appstore::AuthContext;
use crate::error::{Result, ValidationError};
use crate::legacy::LegacyRunner;

use super::appstore_backend::AppStoreBackend;
use super::legacy_backend::LegacyBackend;
use super::types::{ProfileKind, ProvisioningProfile, ProvisioningProfileStoreInfo};

/// One of the two ways to reach provisioning state
///
/// Implementations receive pre-validated input: a non-empty profile id and a
/// resolved certificate serial number. Team attribution on returned records
/// is overwritten by the caller and may be left as reported.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    /// Attach the certificate to an existing profile and re-issue it
    async fn use_existing_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        profile_id: &str,
        serial_number: &str,
        kind: ProfileKind,
    ) -> Result<ProvisioningProfile>;

    /// All profiles of the given kind for a bundle identifier
    async fn list_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<Vec<ProvisioningProfileStoreInfo>>;

    /// Create a new profile with the certificate and an empty device list
    async fn create_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        serial_number: &str,
        name: &str,
        kind: ProfileKind,
    ) -> Result<ProvisioningProfile>;

    /// Delete every profile of the given kind for a bundle identifier
    async fn revoke_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<()>;
}

/// Choose the backend for this invocation from configuration
pub fn select_backend(config: &ClientConfig) -> Result<Box<dyn ProvisioningBackend>> {
    if config.use_legacy_runner {
        let program = config.legacy_runner_path.as_deref().ok_or_else(|| {
            ValidationError::invalid_configuration(
                "use_legacy_runner is set but legacy_runner_path is not",
            )
        })?;
        Ok(Box::new(LegacyBackend::new(LegacyRunner::new(program))))
    } else {
        Ok(Box::new(AppStoreBackend::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_selection_requires_runner_path() {
        let mut config = ClientConfig::test();
        config.use_legacy_runner = true;
        config.legacy_runner_path = None;
        assert!(select_backend(&config).is_err());
    }

    #[test]
    fn test_default_selection_is_typed_api() {
        let config = ClientConfig::test();
        assert!(select_backend(&config).is_ok());
    }
}
