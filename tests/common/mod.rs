use feedback_desk::configuration::Settings;
use feedback_desk::connectors::backend::mock::{MockAuthConnector, MockFeedbackStore};
use feedback_desk::connectors::Backend;
use feedback_desk::models::{FeedbackId, FeedbackRecord, Lenient};
use std::sync::Arc;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub store: Arc<MockFeedbackStore>,
    pub auth: Arc<MockAuthConnector>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn sign_in(&self, email: &str, password: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/auth/signin", &self.address))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Access token of a fresh session for `email`.
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let body: serde_json::Value = self.sign_in(email, password).await.json().await.unwrap();
        body["item"]["access_token"].as_str().unwrap().to_string()
    }
}

/// Serves `backend` on a random port and returns the base address.
pub async fn spawn_server(backend: Backend) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = feedback_desk::startup::run_with_backend(listener, Settings::default(), backend)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

pub async fn spawn_app_with(auth: MockAuthConnector, store: MockFeedbackStore) -> TestApp {
    let auth = Arc::new(auth);
    let store = Arc::new(store);
    let address = spawn_server(Backend {
        auth: auth.clone(),
        store: store.clone(),
    })
    .await;

    TestApp {
        address,
        store,
        auth,
    }
}

#[allow(dead_code)]
pub async fn spawn_app() -> TestApp {
    spawn_app_with(
        MockAuthConnector::new().with_user("admin@example.com", "hunter22"),
        MockFeedbackStore::new(),
    )
    .await
}

#[allow(dead_code)]
pub fn record(id: i64, name: &str, kind: &str, rating: i32, status: &str, message: &str) -> FeedbackRecord {
    FeedbackRecord {
        id: FeedbackId::Number(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        kind: Lenient::parse(kind),
        rating,
        message: message.to_string(),
        status: Lenient::parse(status),
        created_at: chrono::Utc::now() - chrono::Duration::hours(id),
    }
}
