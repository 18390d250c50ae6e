//! Data types for provisioning-profile management

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::appstore::{RemoteProfileType, SecretString, Team};
use crate::error::Result;

/// Profile class requested by the caller
///
/// Ad-hoc profiles target a fixed device list; general profiles target App
/// Store or in-house distribution without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileClass {
    AdHoc,
    #[default]
    General,
}

/// The resolved profile kind for a `(class, in-house)` pair
///
/// This is the single two-input/four-output mapping both backends consume;
/// the typed-API enum and the legacy script token are projections of it and
/// cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    AppStoreAdhoc,
    AppStoreDist,
    InHouseAdhoc,
    InHouseDist,
}

impl ProfileKind {
    /// Resolve the kind for a profile class on a team
    pub fn resolve(class: ProfileClass, in_house: bool) -> Self {
        match (class, in_house) {
            (ProfileClass::AdHoc, true) => Self::InHouseAdhoc,
            (ProfileClass::AdHoc, false) => Self::AppStoreAdhoc,
            (ProfileClass::General, true) => Self::InHouseDist,
            (ProfileClass::General, false) => Self::AppStoreDist,
        }
    }

    /// The typed-API profile type for this kind
    ///
    /// Note the store uses one ad-hoc type for both team kinds.
    pub fn remote_type(&self) -> RemoteProfileType {
        match self {
            Self::AppStoreAdhoc | Self::InHouseAdhoc => RemoteProfileType::IosAppAdhoc,
            Self::AppStoreDist => RemoteProfileType::IosAppStore,
            Self::InHouseDist => RemoteProfileType::IosAppInhouse,
        }
    }

    /// The legacy script's profile-type token for this kind
    pub fn legacy_token(&self) -> &'static str {
        match self {
            Self::AppStoreAdhoc => "app_store_adhoc",
            Self::AppStoreDist => "app_store_dist",
            Self::InHouseAdhoc => "in_house_adhoc",
            Self::InHouseDist => "in_house_dist",
        }
    }
}

/// A local distribution-certificate record
///
/// The serial number is derived from the PKCS#12 blob on first use and
/// memoized on the value itself; callers never see a partially-resolved
/// record mutate underneath them.
pub struct DistributionCertificate {
    cert_p12: Vec<u8>,
    cert_password: SecretString,
    serial_number: OnceCell<String>,
}

impl DistributionCertificate {
    pub fn new(cert_p12: Vec<u8>, cert_password: SecretString) -> Self {
        Self {
            cert_p12,
            cert_password,
            serial_number: OnceCell::new(),
        }
    }

    /// Build a record whose serial number is already known
    pub fn with_serial_number(
        cert_p12: Vec<u8>,
        cert_password: SecretString,
        serial_number: String,
    ) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(serial_number);
        Self {
            cert_p12,
            cert_password,
            serial_number: cell,
        }
    }

    /// The certificate's serial number, derived from the blob once
    pub fn serial_number(&self) -> Result<&str> {
        self.serial_number
            .get_or_try_init(|| {
                super::certificate::find_p12_serial_number(
                    &self.cert_p12,
                    self.cert_password.expose(),
                )
            })
            .map(String::as_str)
    }
}

/// A provisioning profile as handed back to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisioningProfile {
    pub profile_id: String,
    /// Base64-encoded signed profile; absent when the remote profile expired
    pub content: Option<String>,
    pub team_id: String,
    pub team_name: String,
}

impl ProvisioningProfile {
    /// Overwrite team attribution with the invoking session's team
    pub fn stamp_team(&mut self, team: &Team) {
        self.team_id = team.id.clone();
        self.team_name = team.name.clone();
    }
}

/// Certificate summary attached to a listed profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreCertificateInfo {
    pub id: String,
    pub serial_number: String,
    pub name: Option<String>,
}

/// Read model for listing profiles; never written back to the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningProfileStoreInfo {
    pub profile_id: String,
    pub name: String,
    pub status: Option<String>,
    /// Expiration as epoch seconds
    pub expires: Option<i64>,
    pub distribution_method: String,
    pub content: Option<String>,
    pub certificates: Vec<StoreCertificateInfo>,
    pub team_id: String,
    pub team_name: String,
}

impl ProvisioningProfileStoreInfo {
    /// Overwrite team attribution with the invoking session's team
    pub fn stamp_team(&mut self, team: &Team) {
        self.team_id = team.id.clone();
        self.team_name = team.name.clone();
    }
}
