//! Typed-API backend behavior against a mock store server.

use std::sync::Arc;

use httpmock::{Method::DELETE, Method::GET, Method::POST, MockServer};
use serde_json::json;
use storeship_client_core::appstore::client::{ApiKey, AppStoreClient};
use storeship_client_core::error::{Error, RemoteError};
use storeship_client_core::provisioning::{ProfileClass, ProfileService, AppStoreBackend};
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

fn service() -> ProfileService {
    ProfileService::new(Box::new(AppStoreBackend::new()))
}

fn mock_bundle_lookup(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/bundleIds")
            .query_param("filter[identifier]", "com.example.app");
        then.status(200).json_body(json!({
            "data": [{ "id": "BID1", "attributes": { "identifier": "com.example.app", "name": "Example" } }]
        }));
    });
}

fn profile_json(id: &str, profile_type: &str, content: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "attributes": {
            "name": format!("profile {id}"),
            "profileState": "ACTIVE",
            "profileType": profile_type,
            "profileContent": content,
            "expirationDate": "2027-06-01T00:00:00Z"
        }
    })
}

#[tokio::test]
async fn use_existing_with_unknown_profile_id_fails_without_mutating() {
    let server = MockServer::start();
    mock_bundle_lookup(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/certificates")
            .query_param("filter[serialNumber]", test_data::TEST_SERIAL);
        then.status(200).json_body(json!({
            "data": [{ "id": "CERT1", "attributes": { "serialNumber": test_data::TEST_SERIAL } }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds/BID1/profiles");
        then.status(200).json_body(json!({
            "data": [profile_json("OTHER", "IOS_APP_STORE", Some("AAAA"))]
        }));
    });
    let regenerate = server.mock(|when, then| {
        when.method(POST).path_contains("/regenerate");
        then.status(200).json_body(json!({ "data": null }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    let err = service()
        .use_existing_profile(
            &auth,
            "com.example.app",
            &test_data::foreign_team_profile("MISSING"),
            &test_data::certificate(),
            ProfileClass::General,
        )
        .await
        .unwrap_err();

    match err {
        Error::Remote(RemoteError::ProfileNotFound {
            bundle_identifier,
            profile_id,
        }) => {
            assert_eq!(bundle_identifier, "com.example.app");
            assert_eq!(profile_id, "MISSING");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(regenerate.hits(), 0);
}

#[tokio::test]
async fn use_existing_fails_loudly_when_regenerated_content_is_empty() {
    let server = MockServer::start();
    mock_bundle_lookup(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/certificates")
            .query_param("filter[serialNumber]", test_data::TEST_SERIAL);
        then.status(200).json_body(json!({
            "data": [{ "id": "CERT1", "attributes": { "serialNumber": test_data::TEST_SERIAL } }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds/BID1/profiles");
        then.status(200).json_body(json!({
            "data": [profile_json("P1", "IOS_APP_STORE", Some("AAAA"))]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/v1/profiles/P1/regenerate");
        then.status(200).json_body(json!({
            "data": profile_json("P1", "IOS_APP_STORE", None)
        }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    let err = service()
        .use_existing_profile(
            &auth,
            "com.example.app",
            &test_data::foreign_team_profile("P1"),
            &test_data::certificate(),
            ProfileClass::General,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Remote(RemoteError::Inconsistent { .. })
    ));
    assert!(err.to_string().contains("expired"));
}

#[tokio::test]
async fn list_filters_out_profiles_of_other_types() {
    let server = MockServer::start();
    mock_bundle_lookup(&server);

    server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds/BID1/profiles");
        then.status(200).json_body(json!({
            "data": [
                profile_json("STORE1", "IOS_APP_STORE", Some("AAAA")),
                profile_json("ADHOC1", "IOS_APP_ADHOC", Some("BBBB")),
                profile_json("MAC1", "MAC_APP_STORE", Some("CCCC")),
                profile_json("STORE2", "IOS_APP_STORE", Some("DDDD"))
            ]
        }));
    });
    for id in ["STORE1", "STORE2"] {
        server.mock(|when, then| {
            when.method(GET).path(format!("/v1/profiles/{id}/certificates"));
            then.status(200).json_body(json!({
                "data": [{ "id": "CERT1", "attributes": {
                    "serialNumber": test_data::TEST_SERIAL,
                    "displayName": "Distribution"
                } }]
            }));
        });
    }

    let auth = test_data::auth_context(false, client_for(&server));
    let profiles = service()
        .list_profiles(&auth, "com.example.app", ProfileClass::General)
        .await
        .unwrap();

    let ids: Vec<&str> = profiles.iter().map(|p| p.profile_id.as_str()).collect();
    assert_eq!(ids, vec!["STORE1", "STORE2"]);
    for profile in &profiles {
        assert_eq!(profile.distribution_method, "IOS_APP_STORE");
        assert_eq!(profile.team_id, test_data::TEST_TEAM_ID);
        assert_eq!(profile.certificates.len(), 1);
        assert_eq!(profile.certificates[0].serial_number, test_data::TEST_SERIAL);
    }
}

#[tokio::test]
async fn revoke_deletes_each_matching_profile_and_nothing_else() {
    let server = MockServer::start();
    mock_bundle_lookup(&server);

    server.mock(|when, then| {
        when.method(GET).path("/v1/bundleIds/BID1/profiles");
        then.status(200).json_body(json!({
            "data": [
                profile_json("STORE1", "IOS_APP_STORE", Some("AAAA")),
                profile_json("ADHOC1", "IOS_APP_ADHOC", Some("BBBB")),
                profile_json("STORE2", "IOS_APP_STORE", Some("CCCC"))
            ]
        }));
    });
    let delete_store1 = server.mock(|when, then| {
        when.method(DELETE).path("/v1/profiles/STORE1");
        then.status(204);
    });
    let delete_store2 = server.mock(|when, then| {
        when.method(DELETE).path("/v1/profiles/STORE2");
        then.status(204);
    });
    let delete_adhoc = server.mock(|when, then| {
        when.method(DELETE).path("/v1/profiles/ADHOC1");
        then.status(204);
    });

    let auth = test_data::auth_context(false, client_for(&server));
    service()
        .revoke_profiles(&auth, "com.example.app", ProfileClass::General)
        .await
        .unwrap();

    assert_eq!(delete_store1.hits(), 1);
    assert_eq!(delete_store2.hits(), 1);
    assert_eq!(delete_adhoc.hits(), 0);
}

#[tokio::test]
async fn create_profile_resolves_certificate_and_bundle_then_posts() {
    let server = MockServer::start();
    mock_bundle_lookup(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/certificates")
            .query_param("filter[serialNumber]", test_data::TEST_SERIAL);
        then.status(200).json_body(json!({
            "data": [{ "id": "CERT1", "attributes": { "serialNumber": test_data::TEST_SERIAL } }]
        }));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/profiles")
            .json_body_partial(
                r#"{ "data": { "type": "profiles", "attributes": { "name": "new dist", "profileType": "IOS_APP_STORE" } } }"#,
            );
        then.status(201).json_body(json!({
            "data": profile_json("NEW1", "IOS_APP_STORE", Some("EEEE"))
        }));
    });

    let auth = test_data::auth_context(false, client_for(&server));
    let profile = service()
        .create_profile(
            &auth,
            "com.example.app",
            &test_data::certificate(),
            "new dist",
            ProfileClass::General,
        )
        .await
        .unwrap();

    assert_eq!(profile.profile_id, "NEW1");
    assert_eq!(profile.content.as_deref(), Some("EEEE"));
    assert_eq!(profile.team_id, test_data::TEST_TEAM_ID);
    assert_eq!(create.hits(), 1);
}
