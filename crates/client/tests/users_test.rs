use pretty_assertions::assert_eq;
use serde_json::json;
use slotbook_client::{ClientConfig, UserApi, UserClient};
use slotbook_core::errors::BookingError;
use slotbook_core::models::user::{CreateUserRequest, LoginRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> UserClient {
    UserClient::new(&ClientConfig::new(format!("{}/api/", server.uri())))
        .expect("Failed to build user client")
}

#[tokio::test]
async fn test_login_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .and(body_json(json!({ "email": "ana@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Ana",
            "email": "ana@example.com",
            "maxMinutesPerDay": 240
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let user = client
        .login(LoginRequest {
            email: "ana@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.daily_quota(), 240);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::NotFound(ref message) if message == "User not found"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/register"))
        .and(body_json(json!({ "name": "Ana", "email": "ana@example.com" })))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "error": "Email already registered" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .register(CreateUserRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), Some("Email already registered"));
}
