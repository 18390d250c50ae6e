//! Session and team context resolution
//!
//! One [`AuthContext`] is established per command invocation and passed
//! read-only through every operation. The typed path authenticates with an
//! API key; the Apple ID password is carried only when the legacy scripted
//! backend was selected, and is zeroized on drop.

use std::fmt;
use std::sync::Arc;

use log::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ClientConfig;
use crate::error::{Result, ValidationError};

use super::client::{ApiKey, AppStoreClient};

/// Developer team the session is scoped to
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// Enterprise (in-house) account
    pub in_house: bool,
}

/// A secret that is wiped from memory on drop and redacted in debug output
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(***)")
    }
}

/// Authenticated session context for one command invocation
///
/// Read-only after creation and never persisted.
#[derive(Debug)]
pub struct AuthContext {
    pub apple_id: String,
    apple_id_password: Option<SecretString>,
    pub team: Team,
    client: Arc<AppStoreClient>,
}

impl AuthContext {
    pub fn new(
        apple_id: String,
        apple_id_password: Option<SecretString>,
        team: Team,
        client: Arc<AppStoreClient>,
    ) -> Self {
        Self {
            apple_id,
            apple_id_password,
            team,
            client,
        }
    }

    /// The typed client bound to this session
    pub fn request_context(&self) -> &AppStoreClient {
        &self.client
    }

    /// The Apple ID password, available only on the legacy path
    pub fn legacy_password(&self) -> Result<&str> {
        self.apple_id_password
            .as_ref()
            .map(SecretString::expose)
            .ok_or_else(|| ValidationError::missing_field("apple_id_password").into())
    }
}

/// Establish an authenticated session and team context from configuration
///
/// Validates the configured team, builds the typed client, and verifies the
/// session with a current-user lookup before handing the context back.
pub async fn authenticate(config: &ClientConfig) -> Result<AuthContext> {
    let client = Arc::new(AppStoreClient::new(ApiKey {
        issuer_id: config.api_issuer_id.clone(),
        key_id: config.api_key_id.clone(),
        private_key_pem: config.api_private_key_pem.clone(),
    })?);
    authenticate_with_client(config, client).await
}

/// Establish a session around an already-built client
///
/// Split out so tests can point the client at a mock server.
pub async fn authenticate_with_client(
    config: &ClientConfig,
    client: Arc<AppStoreClient>,
) -> Result<AuthContext> {
    if config.apple_id.is_empty() {
        return Err(ValidationError::missing_field("apple_id").into());
    }
    if config.team_id.is_empty() || config.team_name.is_empty() {
        return Err(ValidationError::invalid_configuration(
            "team_id and team_name must both be configured",
        )
        .into());
    }

    let password = if config.use_legacy_runner {
        let raw = config.apple_id_password.clone().ok_or_else(|| {
            ValidationError::invalid_configuration(
                "the legacy runner requires apple_id_password to be configured",
            )
        })?;
        Some(SecretString::new(raw))
    } else {
        None
    };

    let user = client.user_by_username(&config.apple_id).await?;
    debug!(
        "authenticated as {} (provisioning allowed: {})",
        user.attributes.username, user.attributes.provisioning_allowed
    );

    Ok(AuthContext::new(
        config.apple_id.clone(),
        password,
        Team {
            id: config.team_id.clone(),
            name: config.team_name.clone(),
            in_house: config.in_house,
        },
        client,
    ))
}

/// Whether the signed-in user may manage provisioning resources
pub async fn is_provisioning_available(auth: &AuthContext) -> Result<bool> {
    let user = auth
        .request_context()
        .user_by_username(&auth.apple_id)
        .await?;
    Ok(user.attributes.provisioning_allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_is_redacted_in_debug() {
        let secret = SecretString::new("hunter2".to_string());
        assert_eq!(format!("{secret:?}"), "SecretString(***)");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_missing_team() {
        let mut config = ClientConfig::test();
        config.team_id = String::new();
        let client = Arc::new(
            AppStoreClient::new(ApiKey {
                issuer_id: "i".to_string(),
                key_id: "k".to_string(),
                private_key_pem: String::new(),
            })
            .unwrap(),
        );
        let err = authenticate_with_client(&config, client).await.unwrap_err();
        assert!(err.to_string().contains("team_id"));
    }

    #[tokio::test]
    async fn test_legacy_path_requires_password() {
        let mut config = ClientConfig::test();
        config.use_legacy_runner = true;
        config.apple_id_password = None;
        let client = Arc::new(
            AppStoreClient::new(ApiKey {
                issuer_id: "i".to_string(),
                key_id: "k".to_string(),
                private_key_pem: String::new(),
            })
            .unwrap(),
        );
        let err = authenticate_with_client(&config, client).await.unwrap_err();
        assert!(err.to_string().contains("apple_id_password"));
    }
}
