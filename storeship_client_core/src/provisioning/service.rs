//! Provisioning-profile operations over an injected backend
//!
//! [`ProfileService`] owns everything the two backends share: input
//! validation, certificate serial resolution, profile-kind resolution, team
//! attribution on results, and the attempt-report-propagate status contract.

use std::sync::Arc;

use crate::appstore::AuthContext;
use crate::error::{Result, ValidationError};
use crate::progress::{NullReporter, StatusReporter};

use super::backend::ProvisioningBackend;
use super::types::{
    DistributionCertificate, ProfileClass, ProfileKind, ProvisioningProfile,
    ProvisioningProfileStoreInfo,
};

/// Orchestrates profile operations against the selected backend
pub struct ProfileService {
    backend: Box<dyn ProvisioningBackend>,
    reporter: Arc<dyn StatusReporter>,
}

impl ProfileService {
    pub fn new(backend: Box<dyn ProvisioningBackend>) -> Self {
        Self {
            backend,
            reporter: Arc::new(NullReporter),
        }
    }

    /// Attach a status reporter (spinner) to all operations
    pub fn with_reporter(mut self, reporter: Arc<dyn StatusReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Re-issue an existing profile with the given distribution certificate
    ///
    /// Fails locally, before any backend call, when the profile record has no
    /// id. The returned profile carries the session team's attribution.
    pub async fn use_existing_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        profile: &ProvisioningProfile,
        certificate: &DistributionCertificate,
        class: ProfileClass,
    ) -> Result<ProvisioningProfile> {
        self.reporter
            .task_started("Configuring existing provisioning profile from the store...");
        let result = self
            .try_use_existing(auth, bundle_identifier, profile, certificate, class)
            .await;
        self.finish(result, None, |mut p| {
            p.stamp_team(&auth.team);
            p
        })
    }

    async fn try_use_existing(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        profile: &ProvisioningProfile,
        certificate: &DistributionCertificate,
        class: ProfileClass,
    ) -> Result<ProvisioningProfile> {
        if profile.profile_id.is_empty() {
            return Err(ValidationError::missing_field("profile_id").into());
        }
        let serial = certificate.serial_number()?;
        let kind = ProfileKind::resolve(class, auth.team.in_house);
        self.backend
            .use_existing_profile(auth, bundle_identifier, &profile.profile_id, serial, kind)
            .await
    }

    /// List profiles of the given class for a bundle identifier
    pub async fn list_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        class: ProfileClass,
    ) -> Result<Vec<ProvisioningProfileStoreInfo>> {
        self.reporter
            .task_started("Getting provisioning profiles from the store...");
        let kind = ProfileKind::resolve(class, auth.team.in_house);
        let result = self
            .backend
            .list_profiles(auth, bundle_identifier, kind)
            .await;
        self.finish(result, None, |mut profiles| {
            for profile in &mut profiles {
                profile.stamp_team(&auth.team);
            }
            profiles
        })
    }

    /// Create a new profile holding the given certificate and no devices
    pub async fn create_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        certificate: &DistributionCertificate,
        name: &str,
        class: ProfileClass,
    ) -> Result<ProvisioningProfile> {
        self.reporter
            .task_started("Creating provisioning profile on the store...");
        let result = self
            .try_create(auth, bundle_identifier, certificate, name, class)
            .await;
        self.finish(
            result,
            Some("Failed to create provisioning profile on the store"),
            |mut p| {
                p.stamp_team(&auth.team);
                p
            },
        )
    }

    async fn try_create(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        certificate: &DistributionCertificate,
        name: &str,
        class: ProfileClass,
    ) -> Result<ProvisioningProfile> {
        let serial = certificate.serial_number()?;
        let kind = ProfileKind::resolve(class, auth.team.in_house);
        self.backend
            .create_profile(auth, bundle_identifier, serial, name, kind)
            .await
    }

    /// Delete every profile of the given class for a bundle identifier
    pub async fn revoke_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        class: ProfileClass,
    ) -> Result<()> {
        self.reporter
            .task_started("Revoking provisioning profiles on the store...");
        let kind = ProfileKind::resolve(class, auth.team.in_house);
        let result = self
            .backend
            .revoke_profiles(auth, bundle_identifier, kind)
            .await;
        self.finish(
            result,
            Some("Failed to revoke provisioning profiles on the store"),
            |v| v,
        )
    }

    /// Mark the reporter and map the success value; errors propagate untouched
    fn finish<T, U>(
        &self,
        result: Result<T>,
        failure_message: Option<&str>,
        on_success: impl FnOnce(T) -> U,
    ) -> Result<U> {
        match result {
            Ok(value) => {
                self.reporter.task_succeeded();
                Ok(on_success(value))
            }
            Err(error) => {
                self.reporter.task_failed(failure_message);
                Err(error)
            }
        }
    }
}
