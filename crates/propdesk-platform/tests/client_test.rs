//! Platform client integration tests against a mock HTTP server.
//!
//! Exercises token verification, object download/upload, and the redeploy
//! hook through real HTTP round trips.

use bytes::Bytes;
use propdesk_platform::{AuthClient, HookClient, PlatformError, StorageClient};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[test]
fn factory_rejects_missing_credentials() {
    assert!(matches!(
        AuthClient::new("", "anon-key"),
        Err(PlatformError::Configuration { .. })
    ));
    assert!(matches!(
        AuthClient::new("https://platform.example", "  "),
        Err(PlatformError::Configuration { .. })
    ));
    assert!(matches!(
        StorageClient::new("https://platform.example", ""),
        Err(PlatformError::Configuration { .. })
    ));
    assert!(matches!(HookClient::new(""), Err(PlatformError::Configuration { .. })));
}

#[tokio::test]
async fn verify_token_returns_the_user_behind_the_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer user-token"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5f3c0b6e-2b37-4f0b-9a4e-1f2d3c4b5a69",
            "email": "Admin@Example.com",
            "role": "authenticated"
        })))
        .mount(&server)
        .await;

    let client = AuthClient::new(&server.uri(), "anon-key").expect("client");
    let user = client.verify_token("user-token").await.expect("verified user");

    assert_eq!(user.email.as_deref(), Some("Admin@Example.com"));
}

#[tokio::test]
async fn verify_token_maps_rejection_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "invalid JWT"
        })))
        .mount(&server)
        .await;

    let client = AuthClient::new(&server.uri(), "anon-key").expect("client");

    assert!(matches!(
        client.verify_token("expired-token").await,
        Err(PlatformError::Unauthorized)
    ));
}

#[tokio::test]
async fn verify_token_treats_unusable_user_record_as_unauthorized() {
    let server = MockServer::start().await;
    // 200 with no user payload: the token verified but there is nobody
    // behind it.
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = AuthClient::new(&server.uri(), "anon-key").expect("client");

    assert!(matches!(client.verify_token("token").await, Err(PlatformError::Unauthorized)));
}

#[tokio::test]
async fn download_returns_object_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/object/properties/properties.json"))
        .and(header("authorization", "Bearer service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = StorageClient::new(&server.uri(), "service-key").expect("client");
    let body = client.download("properties", "properties.json").await.expect("download");

    assert_eq!(body, Bytes::from_static(b"[]"));
}

#[tokio::test]
async fn download_distinguishes_missing_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/object/properties/properties.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "not_found",
            "message": "Object not found"
        })))
        .mount(&server)
        .await;

    let client = StorageClient::new(&server.uri(), "service-key").expect("client");

    assert!(matches!(
        client.download("properties", "properties.json").await,
        Err(PlatformError::NotFound { .. })
    ));
}

#[tokio::test]
async fn download_surfaces_other_failures_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/object/properties/properties.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let client = StorageClient::new(&server.uri(), "service-key").expect("client");

    match client.download("properties", "properties.json").await {
        Err(PlatformError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "backend unavailable");
        },
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_overwrites_with_upsert() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/properties/properties.json"))
        .and(header("authorization", "Bearer service-key"))
        .and(header("x-upsert", "true"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "properties/properties.json"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StorageClient::new(&server.uri(), "service-key").expect("client");
    client
        .upload("properties", "properties.json", Bytes::from_static(b"[]"), "application/json")
        .await
        .expect("upload");
}

#[tokio::test]
async fn upload_failure_carries_the_platform_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/properties/properties.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&server)
        .await;

    let client = StorageClient::new(&server.uri(), "service-key").expect("client");
    let result = client
        .upload("properties", "properties.json", Bytes::from_static(b"[]"), "application/json")
        .await;

    assert!(matches!(result, Err(PlatformError::UnexpectedStatus { status: 500, .. })));
}

#[tokio::test]
async fn hook_trigger_posts_an_empty_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/redeploy"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let hook = HookClient::new(&format!("{}/hooks/redeploy", server.uri())).expect("hook");
    hook.trigger().await.expect("hook accepted");
}

#[tokio::test]
async fn hook_trigger_reports_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/redeploy"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let hook = HookClient::new(&format!("{}/hooks/redeploy", server.uri())).expect("hook");

    assert!(matches!(hook.trigger().await, Err(PlatformError::UnexpectedStatus { .. })));
}
