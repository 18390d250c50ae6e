//! Mock implementation of the provisioning backend for testing
//!
//! The mock records every call it receives and returns configurable results,
//! so service-level behavior (validation ordering, team stamping, status
//! reporting) can be tested without a store or a scripted tool.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storeship_client_core::appstore::AuthContext;
use storeship_client_core::error::{Error, RemoteError, Result};
use storeship_client_core::provisioning::{
    ProfileKind, ProvisioningBackend, ProvisioningProfile, ProvisioningProfileStoreInfo,
};

/// One observed backend invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    UseExisting {
        bundle_identifier: String,
        profile_id: String,
        serial_number: String,
        token: &'static str,
    },
    List {
        bundle_identifier: String,
        token: &'static str,
    },
    Create {
        bundle_identifier: String,
        serial_number: String,
        name: String,
        token: &'static str,
    },
    Revoke {
        bundle_identifier: String,
        token: &'static str,
    },
}

enum MockResult<T> {
    Success(T),
    Failure(String),
}

impl<T: Clone> MockResult<T> {
    fn produce(&self) -> Result<T> {
        match self {
            Self::Success(value) => Ok(value.clone()),
            Self::Failure(message) => Err(Error::Remote(RemoteError::Inconsistent {
                message: message.clone(),
            })),
        }
    }
}

struct State {
    calls: Vec<RecordedCall>,
    use_existing: MockResult<ProvisioningProfile>,
    list: MockResult<Vec<ProvisioningProfileStoreInfo>>,
    create: MockResult<ProvisioningProfile>,
    revoke: MockResult<()>,
}

impl Default for State {
    fn default() -> Self {
        // Team attribution deliberately differs from any test team so that
        // stamping behavior is observable.
        let profile = ProvisioningProfile {
            profile_id: "MOCKPROFILE1".to_string(),
            content: Some("bW9jaw==".to_string()),
            team_id: "REPORTED_TEAM".to_string(),
            team_name: "Reported Team".to_string(),
        };
        Self {
            calls: Vec::new(),
            use_existing: MockResult::Success(profile.clone()),
            list: MockResult::Success(Vec::new()),
            create: MockResult::Success(profile),
            revoke: MockResult::Success(()),
        }
    }
}

/// Configurable mock provisioning backend
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<State>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_use_existing_profile(self, profile: ProvisioningProfile) -> Self {
        self.state.lock().unwrap().use_existing = MockResult::Success(profile);
        self
    }

    pub fn with_list_profiles(self, profiles: Vec<ProvisioningProfileStoreInfo>) -> Self {
        self.state.lock().unwrap().list = MockResult::Success(profiles);
        self
    }

    pub fn with_create_profile(self, profile: ProvisioningProfile) -> Self {
        self.state.lock().unwrap().create = MockResult::Success(profile);
        self
    }

    pub fn fail_use_existing(self, message: &str) -> Self {
        self.state.lock().unwrap().use_existing = MockResult::Failure(message.to_string());
        self
    }

    pub fn fail_revoke(self, message: &str) -> Self {
        self.state.lock().unwrap().revoke = MockResult::Failure(message.to_string());
        self
    }

    /// Every call observed so far, in order
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl ProvisioningBackend for MockBackend {
    async fn use_existing_profile(
        &self,
        _auth: &AuthContext,
        bundle_identifier: &str,
        profile_id: &str,
        serial_number: &str,
        kind: ProfileKind,
    ) -> Result<ProvisioningProfile> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::UseExisting {
            bundle_identifier: bundle_identifier.to_string(),
            profile_id: profile_id.to_string(),
            serial_number: serial_number.to_string(),
            token: kind.legacy_token(),
        });
        state.use_existing.produce()
    }

    async fn list_profiles(
        &self,
        _auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<Vec<ProvisioningProfileStoreInfo>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::List {
            bundle_identifier: bundle_identifier.to_string(),
            token: kind.legacy_token(),
        });
        state.list.produce()
    }

    async fn create_profile(
        &self,
        _auth: &AuthContext,
        bundle_identifier: &str,
        serial_number: &str,
        name: &str,
        kind: ProfileKind,
    ) -> Result<ProvisioningProfile> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Create {
            bundle_identifier: bundle_identifier.to_string(),
            serial_number: serial_number.to_string(),
            name: name.to_string(),
            token: kind.legacy_token(),
        });
        state.create.produce()
    }

    async fn revoke_profiles(
        &self,
        _auth: &AuthContext,
        bundle_identifier: &str,
        kind: ProfileKind,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Revoke {
            bundle_identifier: bundle_identifier.to_string(),
            token: kind.legacy_token(),
        });
        state.revoke.produce()
    }
}
