//! Wire types for the store's JSON:API resources
//!
//! Only the attributes this tool reads are modeled; everything else in the
//! payload is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-resource response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

/// Collection response envelope with pagination links
#[derive(Debug, Clone, Deserialize)]
pub struct ListDocument<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    pub next: Option<String>,
}

/// Remote profile-type identifiers used by the typed API
///
/// Ad-hoc profiles share one identifier for both team kinds; distribution
/// profiles split between App Store and in-house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteProfileType {
    #[serde(rename = "IOS_APP_ADHOC")]
    IosAppAdhoc,
    #[serde(rename = "IOS_APP_STORE")]
    IosAppStore,
    #[serde(rename = "IOS_APP_INHOUSE")]
    IosAppInhouse,
    /// Profile types this tool does not manage (macOS, development, ...)
    #[serde(other)]
    Unknown,
}

impl RemoteProfileType {
    /// Wire representation, as sent in create requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IosAppAdhoc => "IOS_APP_ADHOC",
            Self::IosAppStore => "IOS_APP_STORE",
            Self::IosAppInhouse => "IOS_APP_INHOUSE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Provisioning profile resource
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: String,
    pub attributes: ProfileAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAttributes {
    pub name: String,
    #[serde(default)]
    pub profile_state: Option<String>,
    pub profile_type: RemoteProfileType,
    /// Base64-encoded signed profile blob; null once the profile has expired
    #[serde(default)]
    pub profile_content: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Signing certificate resource
#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub attributes: CertificateAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttributes {
    pub serial_number: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Bundle identifier resource
#[derive(Debug, Clone, Deserialize)]
pub struct BundleId {
    pub id: String,
    pub attributes: BundleIdAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleIdAttributes {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// App resource
#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub id: String,
    pub attributes: AppAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    pub name: String,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub primary_locale: Option<String>,
}

/// Team member resource
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub attributes: UserAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttributes {
    pub username: String,
    #[serde(default)]
    pub provisioning_allowed: bool,
}
