//! Typed App Store Connect client
//!
//! A thin, resource-oriented client for the store's JSON:API surface plus the
//! authenticated session context the rest of the library passes around. The
//! client owns transport and token concerns; resource semantics live with the
//! callers.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{AuthContext, SecretString, Team, authenticate, is_provisioning_available};
pub use client::{ApiKey, AppStoreClient};
pub use types::{
    App, AppAttributes, BundleId, Certificate, Profile, ProfileAttributes, RemoteProfileType, User,
};
