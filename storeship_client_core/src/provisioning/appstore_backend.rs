//! Typed-API implementation of the provisioning backend

use async_trait::async_trait;
use futures::future::try_join_all;
use log::debug;

use crate::appstore::AuthContext;
use crate::appstore::types::{Certificate, Profile};
use crate::error::{RemoteError, Result};

use super::backend::ProvisioningBackend;
use super::types::{
    ProfileKind, ProvisioningProfile, ProvisioningProfileStoreInfo, StoreCertificateInfo,
};

/// Backend that talks to the store's typed JSON:API
#[derive(Debug, Default)]
pub struct AppStoreBackend;

impl AppStoreBackend {
    pub fn new() -> Self {
        Self
    }

    async fn store_info(
        auth: &AuthContext,
        profile: &Profile,
    ) -> Result<ProvisioningProfileStoreInfo> {
        let certificates = auth
            .request_context()
            .certificates_for_profile(&profile.id)
            .await?
            .into_iter()
            .map(transform_certificate)
            .collect();

        Ok(ProvisioningProfileStoreInfo {
            profile_id: profile.id.clone(),
            name: profile.attributes.name.clone(),
            status: profile.attributes.profile_state.clone(),
            expires: profile.attributes.expiration_date.map(|d| d.timestamp()),
            distribution_method: profile.attributes.profile_type.as_str().to_string(),
            content: profile.attributes.profile_content.clone(),
            certificates,
            team_id: auth.team.id.clone(),
            team_name: auth.team.name.clone(),
        })
    }
}

fn transform_certificate(cert: Certificate) -> StoreCertificateInfo {
    StoreCertificateInfo {
        id: cert.id,
        serial_number: cert.attributes.serial_number,
        name: cert.attributes.display_name.or(cert.attributes.name),
    }
}

#[async_trait]
impl ProvisioningBackend for AppStoreBackend {
    async fn use_existing_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        profile_id: &str,
        serial_number: &str,
        _kind: ProfileKind,
    ) -> Result<ProvisioningProfile> {
        let client = auth.request_context();
        let certificate = client.certificate_by_serial(serial_number).await?;

        let profiles = client.profiles_for_bundle_id(bundle_identifier).await?;
        let profile = profiles
            .into_iter()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| RemoteError::profile_not_found(bundle_identifier, profile_id))?;

        // Replace the certificate set with exactly the resolved certificate
        let regenerated = client
            .regenerate_profile(&profile.id, std::slice::from_ref(&certificate.id))
            .await?;

        let content = regenerated
            .attributes
            .profile_content
            .filter(|c| !c.is_empty());
        let Some(content) = content else {
            // A just-regenerated profile must carry content; an empty blob
            // means the remote considers it expired.
            return Err(RemoteError::inconsistent(&format!(
                "provisioning profile \"{}\" ({}) is expired",
                regenerated.attributes.name, regenerated.id
            ))
            .into());
        };

        Ok(ProvisioningProfile {
            profile_id: regenerated.id,
            content: Some(content),
            team_id: auth.team.id.clone(),
            team_name: auth.team.name.clone(),
        })
    }

    async fn list_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<Vec<ProvisioningProfileStoreInfo>> {
        let client = auth.request_context();
        let profile_type = kind.remote_type();
        let profiles: Vec<Profile> = client
            .profiles_for_bundle_id(bundle_identifier)
            .await?
            .into_iter()
            .filter(|p| p.attributes.profile_type == profile_type)
            .collect();
        debug!(
            "{} profile(s) of type {} for {bundle_identifier}",
            profiles.len(),
            profile_type.as_str()
        );

        try_join_all(profiles.iter().map(|p| Self::store_info(auth, p))).await
    }

    async fn create_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        serial_number: &str,
        name: &str,
        kind: ProfileKind,
    ) -> Result<ProvisioningProfile> {
        let client = auth.request_context();
        let certificate = client.certificate_by_serial(serial_number).await?;
        let bundle = client.bundle_id_for_identifier(bundle_identifier).await?;

        let profile = client
            .create_profile(
                name,
                kind.remote_type(),
                &bundle.id,
                std::slice::from_ref(&certificate.id),
            )
            .await?;

        Ok(ProvisioningProfile {
            profile_id: profile.id,
            content: profile.attributes.profile_content,
            team_id: auth.team.id.clone(),
            team_name: auth.team.name.clone(),
        })
    }

    async fn revoke_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<()> {
        let client = auth.request_context();
        let profile_type = kind.remote_type();
        let matching: Vec<Profile> = client
            .profiles_for_bundle_id(bundle_identifier)
            .await?
            .into_iter()
            .filter(|p| p.attributes.profile_type == profile_type)
            .collect();

        try_join_all(matching.iter().map(|p| client.delete_profile(&p.id))).await?;
        Ok(())
    }
}
