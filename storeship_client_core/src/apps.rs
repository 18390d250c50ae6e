//! Idempotent app and bundle-identifier creation
//!
//! Mirrors the submission flow: make sure the bundle identifier is
//! registered (when the user may manage provisioning), make sure the store
//! app record exists, and surface the two known app-name rejections with a
//! remediation hint.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::appstore::types::App;
use crate::appstore::{AuthContext, is_provisioning_available};
use crate::error::{Error, RemoteError, Result};

/// Request shape for creating or locating the store app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppOptions {
    pub app_name: String,
    pub bundle_identifier: String,
    pub language: Option<String>,
    pub company_name: Option<String>,
    pub sku: Option<String>,
}

/// Durable identifiers resulting from app creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStoreResult {
    pub apple_id: String,
    pub asc_app_id: String,
}

const DEFAULT_LANGUAGE: &str = "en-US";

fn sanitize_language(language: Option<&str>) -> String {
    match language {
        Some(l) if !l.trim().is_empty() => l.trim().to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

/// Register the bundle identifier when it does not exist yet
///
/// Create-or-noop; an already-registered identifier is success.
pub async fn ensure_bundle_id_exists_with_name(
    auth: &AuthContext,
    name: &str,
    bundle_identifier: &str,
) -> Result<()> {
    let client = auth.request_context();
    if client.find_bundle_id(bundle_identifier).await?.is_some() {
        return Ok(());
    }
    client.create_bundle_id(bundle_identifier, name).await?;
    Ok(())
}

/// Create the store app when absent, otherwise return the existing record
pub async fn ensure_app_exists(auth: &AuthContext, options: &CreateAppOptions) -> Result<App> {
    let client = auth.request_context();
    if let Some(app) = client
        .find_app_by_bundle_id(&options.bundle_identifier)
        .await?
    {
        return Ok(app);
    }

    let language = sanitize_language(options.language.as_deref());
    let sku = options
        .sku
        .clone()
        .unwrap_or_else(|| options.bundle_identifier.clone());
    client
        .create_app(
            &options.app_name,
            &options.bundle_identifier,
            &language,
            &sku,
            options.company_name.as_deref(),
        )
        .await
}

/// Full submission-time flow: bundle identifier check, then app record
///
/// When the signed-in user cannot manage provisioning the bundle-identifier
/// check is skipped with a warning. Known app-name rejections get a
/// remediation hint logged before the original error is re-thrown unchanged.
pub async fn ensure_app_store_app_exists(
    auth: &AuthContext,
    options: &CreateAppOptions,
) -> Result<AppStoreResult> {
    if is_provisioning_available(auth).await? {
        ensure_bundle_id_exists_with_name(auth, &options.app_name, &options.bundle_identifier)
            .await?;
    } else {
        warn!(
            "Provisioning is not available for user \"{}\", skipping bundle identifier check.",
            auth.apple_id
        );
    }

    let app = match ensure_app_exists(auth, options).await {
        Ok(app) => app,
        Err(error) => {
            if let Some(hint) = app_name_rejection_hint(&error) {
                warn!("{hint}");
            }
            return Err(error);
        }
    };

    Ok(AppStoreResult {
        apple_id: auth.apple_id.clone(),
        asc_app_id: app.id,
    })
}

/// Remediation hint for the two known app-name business-rule rejections
///
/// Prefers the structured error code; matching on message text is a
/// compatibility shim for responses that carry no code, and lives only here.
pub fn app_name_rejection_hint(error: &Error) -> Option<&'static str> {
    const HINT: &str =
        "Change the name in your app config, or use a custom name with the --app-name flag";

    let Error::Remote(RemoteError::Api {
        code, title, detail, ..
    }) = error
    else {
        return None;
    };

    if matches!(
        code.as_deref(),
        Some("ENTITY_ERROR.ATTRIBUTE.INVALID") | Some("ENTITY_ERROR.ATTRIBUTE.TAKEN")
    ) {
        return Some(HINT);
    }

    let text = match detail {
        Some(detail) => format!("{title} {detail}"),
        None => title.clone(),
    };
    let name_invalid = text.contains("App Name contains certain Unicode");
    let name_taken = text.contains("The App Name you entered is already being used");
    (name_invalid || name_taken).then_some(HINT)
}
