// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Integration tests against a mock login service.

use std::time::Duration;

use jsonwebtoken::{encode, EncodingKey, Header};
use loginservice_client::{
    LoginServiceClient, LoginServiceError, MapConfig, RegisterUserRequest, SendEmailRequest,
    TokenRejection,
};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "integration-secret";
const RETURN_URL: &str = "https://app.example.com/welcome";

/// Configuration pointing at the mock server through the shared keys only.
fn config_for(server: &MockServer) -> MapConfig {
    let address = server.address();
    MapConfig::new()
        .with("tooltwist.protocol", "http")
        .with("tooltwist.host", address.ip())
        .with("tooltwist.port", address.port())
        .with("tooltwist.apikey", "APIKEY")
        .with("tooltwist.secret", SECRET)
        .with("loginservice.returnURL", RETURN_URL)
}

fn jane() -> RegisterUserRequest<'static> {
    RegisterUserRequest {
        email: "jane@example.com",
        first_name: "Jane",
        last_name: "Doe",
    }
}

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn sign(claims: Value, secret: &str) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn register_user_puts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/2.0/APIKEY/email/register"))
        .and(body_json(json!({
            "email": "jane@example.com",
            "username": "jane@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "resume": RETURN_URL,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ls_42" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LoginServiceClient::new(config_for(&server)).unwrap();
    let registration = client.register_user(jane()).await.unwrap();
    assert_eq!(registration.user_id(), Some("ls_42"));
}

#[tokio::test]
async fn register_user_accepts_non_json_success() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/2.0/APIKEY/email/register"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let client = LoginServiceClient::new(config_for(&server)).unwrap();
    let registration = client.register_user(jane()).await.unwrap();
    assert!(registration.response.is_none());
}

#[tokio::test]
async fn register_user_reports_server_error_with_email() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/2.0/APIKEY/email/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = LoginServiceClient::new(config_for(&server)).unwrap();
    let err = client.register_user(jane()).await.unwrap_err();
    assert!(matches!(err, LoginServiceError::Upstream { .. }));
    assert!(err.to_string().contains("jane@example.com"));
}

#[tokio::test]
async fn register_user_treats_other_2xx_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = LoginServiceClient::new(config_for(&server)).unwrap();
    let err = client.register_user(jane()).await.unwrap_err();
    assert!(matches!(err, LoginServiceError::Upstream { .. }));
}

#[tokio::test]
async fn register_user_reports_connection_refused() {
    // Bind then release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = MapConfig::new()
        .with("tooltwist.protocol", "http")
        .with("tooltwist.host", "127.0.0.1")
        .with("tooltwist.port", port)
        .with("tooltwist.apikey", "APIKEY")
        .with("loginservice.returnURL", RETURN_URL);

    let client = LoginServiceClient::new(config).unwrap();
    let err = client.register_user(jane()).await.unwrap_err();
    assert!(matches!(err, LoginServiceError::Upstream { .. }));
    assert!(err.to_string().contains("jane@example.com"));
}

#[tokio::test]
async fn register_user_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = LoginServiceClient::new(config_for(&server))
        .unwrap()
        .with_timeout(Duration::from_millis(100));
    let err = client.register_user(jane()).await.unwrap_err();
    assert!(matches!(err, LoginServiceError::Upstream { .. }));
}

#[tokio::test]
async fn service_overrides_take_precedence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/3.0/SERVICEKEY/sendmail"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server)
        .with("tooltwist.port", 1)
        .with("loginservice.port", server.address().port())
        .with("loginservice.version", "3.0")
        .with("loginservice.apikey", "SERVICEKEY");
    let client = LoginServiceClient::new(config).unwrap();

    let params = Map::new();
    client
        .send_email(SendEmailRequest {
            template: "welcome",
            params: &params,
            to_email: "bob@example.com",
            from_email: "noreply@example.com",
            from_name: "Example",
            subject: "Welcome",
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn send_email_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2.0/APIKEY/sendmail"))
        .and(body_json(json!({
            "template": "reset-password",
            "params": { "link": "https://app.example.com/reset/abc" },
            "to_email": "bob@example.com",
            "from_email": "noreply@example.com",
            "from_name": "Example",
            "subject": "Reset your password",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = Map::new();
    params.insert("link".to_string(), json!("https://app.example.com/reset/abc"));

    let client = LoginServiceClient::new(config_for(&server)).unwrap();
    client
        .send_email(SendEmailRequest {
            template: "reset-password",
            params: &params,
            to_email: "bob@example.com",
            from_email: "noreply@example.com",
            from_name: "Example",
            subject: "Reset your password",
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn send_email_reports_failure_with_recipient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let params = Map::new();
    let client = LoginServiceClient::new(config_for(&server)).unwrap();
    let err = client
        .send_email(SendEmailRequest {
            template: "welcome",
            params: &params,
            to_email: "bob@example.com",
            from_email: "noreply@example.com",
            from_name: "Example",
            subject: "Welcome",
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "(LoginService.io) Failed to sendEmail bob@example.com."
    );
}

#[test]
fn endpoint_from_shared_keys_defaults_version() {
    let config = MapConfig::new()
        .with("tooltwist.protocol", "https")
        .with("tooltwist.host", "login.example.com")
        .with("tooltwist.port", 8443)
        .with("tooltwist.apikey", "K");
    let client = LoginServiceClient::new(config).unwrap();
    assert_eq!(
        client.endpoint().unwrap().base_url(),
        "https://login.example.com:8443/2.0/K"
    );
}

#[test]
fn validate_jwt_classifies_failures() {
    let client = LoginServiceClient::new(MapConfig::new().with("loginservice.secret", SECRET))
        .unwrap();

    let valid = sign(json!({ "sub": "u1", "exp": now() + 600 }), SECRET);
    assert!(client.validate_jwt(&valid).is_ok());

    let expired = sign(json!({ "sub": "u1", "exp": now() - 600 }), SECRET);
    let err = client.validate_jwt(&expired).unwrap_err();
    assert!(matches!(
        err,
        LoginServiceError::Unauthorized(TokenRejection::Expired)
    ));
    assert_eq!(err.to_string(), "Authorization token has expired");

    let forged = sign(json!({ "sub": "u1", "exp": now() + 600 }), "not-the-secret");
    let err = client.validate_jwt(&forged).unwrap_err();
    assert_eq!(err.to_string(), "Invalid JWT");
}

#[test]
fn decode_jwt_returns_claims_without_verifying() {
    let client = LoginServiceClient::new(MapConfig::new()).unwrap();

    let forged = sign(json!({ "sub": "u1", "email": "jane@example.com" }), "unknown");
    let claims = client.decode_jwt(&forged).unwrap();
    assert_eq!(claims["email"], "jane@example.com");

    assert!(client.decode_jwt("nope").is_none());
}

#[test]
fn jwt_from_authorization_via_client() {
    let client = LoginServiceClient::new(MapConfig::new()).unwrap();
    assert_eq!(client.jwt_from_authorization("Bearer tok"), "tok");
    assert_eq!(client.jwt_from_authorization("Basic tok"), "");
}
