//! Legacy scripted-tool implementation of the provisioning backend
//!
//! Each operation is one invocation of the legacy tool with positional
//! arguments: credentials, team id, profile-type token, bundle identifier,
//! and verb-specific trailing values. Argument order is part of the tool's
//! contract and must not change.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::appstore::AuthContext;
use crate::error::{ProcessError, Result};
use crate::legacy::LegacyRunner;

use super::backend::ProvisioningBackend;
use super::types::{
    ProfileKind, ProvisioningProfile, ProvisioningProfileStoreInfo, StoreCertificateInfo,
};

/// Backend that shells out to the legacy automation tool
#[derive(Debug, Clone)]
pub struct LegacyBackend {
    runner: LegacyRunner,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyProfilePayload {
    provisioning_profile_id: String,
    #[serde(default)]
    provisioning_profile: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyListPayload {
    #[serde(default)]
    profiles: Vec<LegacyStoreInfoPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyStoreInfoPayload {
    provisioning_profile_id: String,
    name: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    expires: Option<i64>,
    distribution_method: String,
    #[serde(default)]
    provisioning_profile: Option<String>,
    #[serde(default)]
    certificates: Vec<LegacyCertificatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCertificatePayload {
    id: String,
    serial_number: String,
    #[serde(default)]
    name: Option<String>,
}

impl LegacyBackend {
    pub fn new(runner: LegacyRunner) -> Self {
        Self { runner }
    }

    fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|e| {
            ProcessError::unreadable_output("legacy runner", format!("unexpected shape: {e}"))
                .into()
        })
    }

    fn profile_from_payload(auth: &AuthContext, payload: LegacyProfilePayload) -> ProvisioningProfile {
        ProvisioningProfile {
            profile_id: payload.provisioning_profile_id,
            content: payload.provisioning_profile,
            team_id: auth.team.id.clone(),
            team_name: auth.team.name.clone(),
        }
    }
}

#[async_trait]
impl ProvisioningBackend for LegacyBackend {
    async fn use_existing_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        profile_id: &str,
        serial_number: &str,
        kind: ProfileKind,
    ) -> Result<ProvisioningProfile> {
        let password = auth.legacy_password()?;
        let args = [
            auth.apple_id.as_str(),
            password,
            auth.team.id.as_str(),
            kind.legacy_token(),
            bundle_identifier,
            profile_id,
            serial_number,
        ];
        let value = self.runner.run_action("use-existing", &args).await?;
        Ok(Self::profile_from_payload(auth, Self::parse(value)?))
    }

    async fn list_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<Vec<ProvisioningProfileStoreInfo>> {
        let password = auth.legacy_password()?;
        let args = [
            auth.apple_id.as_str(),
            password,
            auth.team.id.as_str(),
            kind.legacy_token(),
            bundle_identifier,
        ];
        let value = self.runner.run_action("list", &args).await?;
        let payload: LegacyListPayload = Self::parse(value)?;
        // Filtering by profile type happens on the tool's side; record the
        // count so a parity break surfaces in debug logs.
        debug!(
            "legacy list returned {} profile(s) for {bundle_identifier}",
            payload.profiles.len()
        );

        Ok(payload
            .profiles
            .into_iter()
            .map(|p| ProvisioningProfileStoreInfo {
                profile_id: p.provisioning_profile_id,
                name: p.name,
                status: p.status,
                expires: p.expires,
                distribution_method: p.distribution_method,
                content: p.provisioning_profile,
                certificates: p
                    .certificates
                    .into_iter()
                    .map(|c| StoreCertificateInfo {
                        id: c.id,
                        serial_number: c.serial_number,
                        name: c.name,
                    })
                    .collect(),
                team_id: auth.team.id.clone(),
                team_name: auth.team.name.clone(),
            })
            .collect())
    }

    async fn create_profile(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        serial_number: &str,
        name: &str,
        kind: ProfileKind,
    ) -> Result<ProvisioningProfile> {
        let password = auth.legacy_password()?;
        let args = [
            auth.apple_id.as_str(),
            password,
            auth.team.id.as_str(),
            kind.legacy_token(),
            bundle_identifier,
            serial_number,
            name,
        ];
        let value = self.runner.run_action("create", &args).await?;
        Ok(Self::profile_from_payload(auth, Self::parse(value)?))
    }

    async fn revoke_profiles(
        &self,
        auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<()> {
        let password = auth.legacy_password()?;
        let args = [
            auth.apple_id.as_str(),
            password,
            auth.team.id.as_str(),
            kind.legacy_token(),
            bundle_identifier,
        ];
        self.runner.run_action("revoke", &args).await?;
        Ok(())
    }
}
