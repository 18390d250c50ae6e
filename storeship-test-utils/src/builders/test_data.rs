//! Canned fixtures for storeship tests

use std::sync::Arc;

use storeship_client_core::appstore::client::{ApiKey, AppStoreClient};
use storeship_client_core::appstore::{AuthContext, SecretString, Team};
use storeship_client_core::provisioning::{
    DistributionCertificate, ProvisioningProfile, ProvisioningProfileStoreInfo,
};

pub const TEST_TEAM_ID: &str = "TESTTEAM01";
pub const TEST_TEAM_NAME: &str = "Test Team";
pub const TEST_APPLE_ID: &str = "tester@example.com";
pub const TEST_SERIAL: &str = "6B43ECBA0661F4E5";

/// A client pointed at the production base URL with a static token
///
/// Fine for tests that never reach the network; use `client_for` with a mock
/// server base URL otherwise.
pub fn offline_client() -> Arc<AppStoreClient> {
    Arc::new(
        AppStoreClient::new(ApiKey {
            issuer_id: "00000000-0000-0000-0000-000000000000".to_string(),
            key_id: "TESTKEY123".to_string(),
            private_key_pem: String::new(),
        })
        .expect("client construction cannot fail")
        .with_static_token("test-token"),
    )
}

pub fn team(in_house: bool) -> Team {
    Team {
        id: TEST_TEAM_ID.to_string(),
        name: TEST_TEAM_NAME.to_string(),
        in_house,
    }
}

/// An authenticated context around the given client
pub fn auth_context(in_house: bool, client: Arc<AppStoreClient>) -> AuthContext {
    AuthContext::new(
        TEST_APPLE_ID.to_string(),
        Some(SecretString::new("test-password".to_string())),
        team(in_house),
        client,
    )
}

/// An offline authenticated context for tests with mocked backends
pub fn offline_auth_context(in_house: bool) -> AuthContext {
    auth_context(in_house, offline_client())
}

/// A certificate record with a pre-resolved serial number
pub fn certificate() -> DistributionCertificate {
    DistributionCertificate::with_serial_number(
        b"test p12 blob".to_vec(),
        SecretString::new("cert-password".to_string()),
        TEST_SERIAL.to_string(),
    )
}

/// A profile record as a remote source might report it, with foreign team
pub fn foreign_team_profile(profile_id: &str) -> ProvisioningProfile {
    ProvisioningProfile {
        profile_id: profile_id.to_string(),
        content: Some("Zm9yZWlnbg==".to_string()),
        team_id: "FOREIGNTEAM".to_string(),
        team_name: "Foreign Team".to_string(),
    }
}

/// A store-info record as a remote source might report it, with foreign team
pub fn foreign_team_store_info(profile_id: &str, name: &str) -> ProvisioningProfileStoreInfo {
    ProvisioningProfileStoreInfo {
        profile_id: profile_id.to_string(),
        name: name.to_string(),
        status: Some("ACTIVE".to_string()),
        expires: Some(1_893_456_000),
        distribution_method: "IOS_APP_STORE".to_string(),
        content: Some("Zm9yZWlnbg==".to_string()),
        certificates: Vec::new(),
        team_id: "FOREIGNTEAM".to_string(),
        team_name: "Foreign Team".to_string(),
    }
}
