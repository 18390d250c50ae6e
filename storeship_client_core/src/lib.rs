//! Storeship Client Core Library
//!
//! This is the core library for the storeship CLI, providing the typed
//! App Store Connect client, provisioning-profile orchestration, app and
//! bundle-identifier management, and the legacy automation tool runner.

pub mod appstore;
pub mod apps;
pub mod error;
pub mod legacy;
pub mod progress;
pub mod provisioning;

// Re-export main types
pub use appstore::{AppStoreClient, AuthContext, Team, authenticate, is_provisioning_available};
pub use apps::{AppStoreResult, CreateAppOptions, ensure_app_store_app_exists};
pub use error::{Error, Result};
pub use progress::{NullReporter, StatusReporter};
pub use provisioning::{
    DistributionCertificate, ProfileClass, ProfileKind, ProfileService, ProvisioningProfile,
    ProvisioningProfileStoreInfo,
};

/// Core client configuration
///
/// Holds everything needed to reach the store API and, when selected, the
/// legacy scripted tool. Secrets are carried as plain fields here; they are
/// zeroized where they end up living long-term (see `appstore::auth`).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// Apple ID used for team attribution and the legacy path
    pub apple_id: String,
    /// Apple ID password, required by the legacy scripted path only
    pub apple_id_password: Option<String>,
    /// Developer team identifier
    pub team_id: String,
    /// Developer team display name
    pub team_name: String,
    /// Whether the team is an enterprise (in-house) account
    pub in_house: bool,
    /// App Store Connect API key issuer id
    pub api_issuer_id: String,
    /// App Store Connect API key id
    pub api_key_id: String,
    /// Contents of the `.p8` API private key, PEM encoded
    pub api_private_key_pem: String,
    /// Select the legacy scripted backend instead of the typed API
    pub use_legacy_runner: bool,
    /// Path to the legacy automation tool
    pub legacy_runner_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            apple_id: String::new(),
            apple_id_password: None,
            team_id: String::new(),
            team_name: String::new(),
            in_house: false,
            api_issuer_id: String::new(),
            api_key_id: String::new(),
            api_private_key_pem: String::new(),
            use_legacy_runner: false,
            legacy_runner_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            apple_id: "tester@example.com".to_string(),
            apple_id_password: Some("testpass".to_string()),
            team_id: "TEAMID9999".to_string(),
            team_name: "Test Team".to_string(),
            in_house: false,
            api_issuer_id: "00000000-0000-0000-0000-000000000000".to_string(),
            api_key_id: "TESTKEY123".to_string(),
            api_private_key_pem: String::new(),
            use_legacy_runner: false,
            legacy_runner_path: None,
        }
    }
}
