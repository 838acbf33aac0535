mod common;

use feedback_desk::connectors::backend::mock::{MockAuthConnector, MockFeedbackStore};
use feedback_desk::connectors::{Backend, BackendConfig, HttpAuthConnector};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sign_in_sets_the_session_cookie() {
    let app = common::spawn_app().await;

    let response = app.sign_in("admin@example.com", "hunter22").await;
    assert_eq!(200, response.status().as_u16());

    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("access_token=mock-access-"));
    assert!(cookie.contains("HttpOnly"));

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["item"]["state"], "authenticated");
    assert_eq!(body["item"]["user"]["email"], "admin@example.com");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = common::spawn_app().await;

    let response = app.sign_in("admin@example.com", "nope").await;
    assert_eq!(401, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid login credentials");
}

#[tokio::test]
async fn session_follows_the_token() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(&format!("{}/auth/session", &app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["item"]["state"], "anonymous");

    let token = app.token_for("admin@example.com", "hunter22").await;
    let body: serde_json::Value = client
        .get(&format!("{}/auth/session", &app.address))
        .header("Cookie", format!("access_token={}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["item"]["state"], "authenticated");
    assert_eq!(body["item"]["user"]["email"], "admin@example.com");
}

#[tokio::test]
async fn sign_out_ends_the_session() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();
    let token = app.token_for("admin@example.com", "hunter22").await;

    let response = client
        .post(&format!("{}/auth/signout", &app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = client
        .get(&format!("{}/auth/session", &app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["item"]["state"], "anonymous");
}

#[tokio::test]
async fn sign_up_signs_in_or_asks_for_confirmation() {
    let app = common::spawn_app().await;
    let payload = json!({
        "email": "new@example.com",
        "password": "secret-pass",
        "phone": "+1 555 0100"
    });

    let response = reqwest::Client::new()
        .post(&format!("{}/auth/signup", &app.address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["item"]["state"], "authenticated");
    assert_eq!(body["item"]["user"]["phone"], "+1 555 0100");

    let app = common::spawn_app_with(
        MockAuthConnector::requiring_confirmation(),
        MockFeedbackStore::new(),
    )
    .await;
    let response = reqwest::Client::new()
        .post(&format!("{}/auth/signup", &app.address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(201, response.status().as_u16());
    assert!(response.headers().get("set-cookie").is_none());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["item"]["state"], "confirmation_pending");
    assert_eq!(body["item"]["message"], "Check your email for confirmation!");
}

#[tokio::test]
async fn duplicate_sign_up_shows_the_service_message() {
    let app = common::spawn_app().await;

    let response = reqwest::Client::new()
        .post(&format!("{}/auth/signup", &app.address))
        .json(&json!({"email": "admin@example.com", "password": "hunter22"}))
        .send()
        .await
        .unwrap();
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User already registered");
}

async fn spawn_app_with_failing_auth(server: &MockServer) -> String {
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"msg": "Service temporarily unavailable"})),
        )
        .mount(server)
        .await;

    let config = BackendConfig {
        url: server.uri(),
        anon_key: "anon-key".to_string(),
        ..BackendConfig::default()
    };
    common::spawn_server(Backend {
        auth: Arc::new(HttpAuthConnector::new(&config).unwrap()),
        store: Arc::new(MockFeedbackStore::new()),
    })
    .await
}

#[tokio::test]
async fn auth_outage_is_not_reported_as_bad_credentials() {
    let server = MockServer::start().await;
    let address = spawn_app_with_failing_auth(&server).await;
    let client = reqwest::Client::new();

    for route in ["signin", "signup"] {
        let response = client
            .post(&format!("{}/auth/{}", address, route))
            .json(&json!({"email": "admin@example.com", "password": "hunter22"}))
            .send()
            .await
            .unwrap();
        assert_eq!(503, response.status().as_u16(), "route {}", route);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Service temporarily unavailable");
    }
}
