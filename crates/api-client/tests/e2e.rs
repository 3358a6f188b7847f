//! End-to-end scenarios for the admin client
//!
//! Each test runs against its own mock server and session file, so tests are
//! independent and order-insensitive.

use serde_json::{Value, json};
use spinovo_api_client::prelude::*;
use spinovo_api_client::{FileSessionStore, session};
use spinovo_core::retry::RetryConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    client: SpinovoClient,
    session_file: tempfile::TempDir,
}

impl Harness {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let session_file = tempfile::tempdir().unwrap();
        let config = ClientConfig::default()
            .with_base_url(format!("{}/api/v1", server.uri()))
            .with_session_file(session_file.path().join("session.json"))
            .with_retry(RetryConfig {
                max_attempts: 3,
                initial_delay: Duration::from_millis(5),
                backoff_multiplier: 2.0,
                max_delay: Duration::from_millis(20),
            });
        let store = Arc::new(FileSessionStore::new(config.session_path().unwrap()));
        let client = SpinovoClient::new(config, store).unwrap();

        Self {
            server,
            client,
            session_file,
        }
    }

    async fn mount_login(&self) {
        Mock::given(method("POST"))
            .and(path("/api/v1/admin/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "msg": "Login successful",
                "data": {"user": {
                    "_id": "adm1",
                    "name": "Asha Rao",
                    "mobile": "9876543210",
                    "access_token": "jwt-1",
                    "admin_role": 1
                }}
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }
}

#[tokio::test]
async fn test_login_then_authenticated_calls() {
    let harness = Harness::start().await;
    harness.mount_login().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/dashboard"))
        .and(header("Authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "msg": "ok",
            "data": {"totalCustomers": 7}
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let env = harness
        .client
        .auth()
        .login("9876543210", "password123")
        .await
        .unwrap();
    assert!(env.status);

    let session = harness.client.session();
    assert!(session.is_authenticated());
    assert_eq!(session.state(), SessionState::Authenticated);

    let remaining = session.expires_at().unwrap() - chrono::Utc::now();
    assert!(remaining > chrono::Duration::hours(23));
    assert!(remaining <= chrono::Duration::hours(24));

    let dashboard = harness.client.dashboard().get().await.unwrap().into_data().unwrap();
    assert_eq!(dashboard.total_customers, 7);

    // a second process sharing the session file sees the login
    let other = AuthSession::new(
        Arc::new(FileSessionStore::new(harness.session_file.path().join("session.json"))),
        "1.0.0",
    );
    assert_eq!(other.token().as_deref(), Some("jwt-1"));
}

#[tokio::test]
async fn test_unauthorized_response_tears_down_session() {
    let harness = Harness::start().await;
    harness.mount_login().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/customer/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": false,
            "msg": "Unauthorized: token expired"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let expired = Arc::new(AtomicBool::new(false));
    let flag = expired.clone();
    let client = harness
        .client
        .clone()
        .with_session_expired_hook(move || flag.store(true, Ordering::SeqCst));

    client.auth().login("9876543210", "password123").await.unwrap();
    assert!(client.session().is_authenticated());

    let err = client.customers().list(1, 20).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(expired.load(Ordering::SeqCst));
    assert!(!client.session().is_authenticated());

    let store = client.session().store();
    assert!(store.get(session::TOKEN_KEY).is_none());
    assert!(store.get(session::USER_KEY).is_none());
    assert!(store.get(session::TOKEN_EXPIRY_KEY).is_none());

    // further calls fail locally
    let err = client.dashboard().get().await.unwrap_err();
    assert_eq!(err.message(), "No authentication token found");
}

#[tokio::test]
async fn test_transient_failures_are_retried_across_services() {
    let harness = Harness::start().await;
    harness.mount_login().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/copilot/list"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/copilot/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "msg": "ok",
            "data": {"copilotTotal": 1, "copilotList": [{"_id": "cp1"}]}
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness
        .client
        .auth()
        .login("9876543210", "password123")
        .await
        .unwrap();

    let data = harness.client.copilots().list(1, 20).await.unwrap().into_data().unwrap();
    assert_eq!(data.copilot_total, 1);
}

#[tokio::test]
async fn test_logout_is_visible_to_clones() {
    let harness = Harness::start().await;
    harness.mount_login().await;

    let client = harness.client.clone();
    client.auth().login("9876543210", "password123").await.unwrap();

    harness.client.session().logout();
    assert_eq!(client.session().inspect(), SessionState::Unauthenticated);
    let err = client.get::<Value>("/admin/dashboard").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
}
