//! App and bundle-identifier ensure flows against a mock store server.

use std::sync::Arc;

use httpmock::{Method::GET, Method::POST, MockServer};
use serde_json::json;
use storeship_client_core::appstore::client::{ApiKey, AppStoreClient};
use storeship_client_core::apps::{
    CreateAppOptions, ensure_app_store_app_exists, ensure_bundle_id_exists_with_name,
};
use storeship_client_core::error::{Error, RemoteError};
use storeship_test_utils::test_data;

fn client_for(server: &MockServer) -> Arc<AppStoreClient> {
    Arc::new(
        AppStoreClient::new(ApiKey {
            issuer_id: "ignored".to_string(),
            key_id: "ignored".to_string(),
            private_key_pem: "ignored".to_string(),
        })
        .unwrap()
        .with_static_token("test")
        .with_base_url(reqwest::Url::parse(&server.base_url()).unwrap()),
    )
}

fn options() -> CreateAppOptions {
    CreateAppOptions {
        app_name: "Example App".to_string(),
        bundle_identifier: "com.example.app".to_string(),
        language: None,
        company_name: None,
        sku: None,
    }
}

fn mock_user(server: &MockServer, provisioning_allowed: bool) {
    server.mock(|when, then| {
        when.method(GET).path("/v1/users");
        then.status(200).json_body(json!({
            "data": [{ "id": "U1", "attributes": {
                "username": test_data::TEST_APPLE_ID,
                "provisioningAllowed": provisioning_allowed
            } }]
        }));
    });
}

#[tokio::test]
async fn ensure_bundle_id_is_a_noop_when_already_registered() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/bundleIds")
            .query_param("filter[identifier]", "com.example.app");
        then.status(200).json_body(json!({
            "data": [{ "id": "BID1", "attributes": { "identifier": "com.example.app" } }]
        }));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/v1/bundleIds");
        then.status(201).json_body(json!({
            "data": { "id": "BID2", "attributes": { "identifier": "com.example.app" } }
        }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    ensure_bundle_id_exists_with_name(&auth, "Example App", "com.example.app")
        .await
        .unwrap();

    assert_eq!(create.hits(), 0);
}

#[tokio::test]
async fn ensure_bundle_id_registers_when_absent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds");
        then.status(200).json_body(json!({ "data": [] }));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/v1/bundleIds").json_body_partial(
            r#"{ "data": { "type": "bundleIds", "attributes": {
                "identifier": "com.example.app", "name": "Example App" } } }"#,
        );
        then.status(201).json_body(json!({
            "data": { "id": "BID9", "attributes": { "identifier": "com.example.app" } }
        }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    ensure_bundle_id_exists_with_name(&auth, "Example App", "com.example.app")
        .await
        .unwrap();

    assert_eq!(create.hits(), 1);
}

#[tokio::test]
async fn full_flow_creates_app_and_returns_durable_identifiers() {
    let server = MockServer::start();
    mock_user(&server, true);
    server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds");
        then.status(200).json_body(json!({
            "data": [{ "id": "BID1", "attributes": { "identifier": "com.example.app" } }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/apps");
        then.status(200).json_body(json!({ "data": [] }));
    });
    let create_app = server.mock(|when, then| {
        when.method(POST).path("/v1/apps");
        then.status(201).json_body(json!({
            "data": { "id": "APP42", "attributes": {
                "name": "Example App",
                "bundleId": "com.example.app",
                "sku": "com.example.app",
                "primaryLocale": "en-US"
            } }
        }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    let result = ensure_app_store_app_exists(&auth, &options()).await.unwrap();

    assert_eq!(result.asc_app_id, "APP42");
    assert_eq!(result.apple_id, test_data::TEST_APPLE_ID);
    assert_eq!(create_app.hits(), 1);
}

#[tokio::test]
async fn full_flow_skips_bundle_check_without_provisioning_permission() {
    let server = MockServer::start();
    mock_user(&server, false);
    let bundle_lookup = server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds");
        then.status(200).json_body(json!({ "data": [] }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/apps");
        then.status(200).json_body(json!({
            "data": [{ "id": "APP7", "attributes": {
                "name": "Example App", "bundleId": "com.example.app"
            } }]
        }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    let result = ensure_app_store_app_exists(&auth, &options()).await.unwrap();

    assert_eq!(result.asc_app_id, "APP7");
    assert_eq!(bundle_lookup.hits(), 0);
}

#[tokio::test]
async fn app_name_taken_rejection_propagates_unchanged() {
    let server = MockServer::start();
    mock_user(&server, true);
    server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds");
        then.status(200).json_body(json!({
            "data": [{ "id": "BID1", "attributes": { "identifier": "com.example.app" } }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/apps");
        then.status(200).json_body(json!({ "data": [] }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/v1/apps");
        then.status(409).json_body(json!({
            "errors": [{
                "code": "ENTITY_ERROR.ATTRIBUTE.TAKEN",
                "title": "The provided entity includes an attribute with a value that has already been used on a different account.",
                "detail": "The App Name you entered is already being used."
            }]
        }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    let err = ensure_app_store_app_exists(&auth, &options())
        .await
        .unwrap_err();

    match err {
        Error::Remote(RemoteError::Api { status, code, .. }) => {
            assert_eq!(status, 409);
            assert_eq!(code.as_deref(), Some("ENTITY_ERROR.ATTRIBUTE.TAKEN"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
