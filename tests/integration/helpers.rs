//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use movebase_api::{AppState, build_router};
use movebase_auth::audit::MemoryAuditSink;
use movebase_core::config::AppConfig;
use movebase_entity::account::{Account, Role};
use movebase_store::MemoryStore;

/// Device context attached to requests unless a test overrides it.
pub const TEST_IP: &str = "10.1.1.1";
pub const TEST_UA: &str = "integration-test/1.0";

/// A password that satisfies the full policy including the entropy check.
pub const STRONG_PASSWORD: &str = "Tr4verse!Mountain#Lamp";

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Engine state for direct seeding and assertions.
    pub state: AppState,
    /// Captured audit entries.
    pub audit_sink: Arc<MemoryAuditSink>,
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Create a test application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let audit_sink = Arc::new(MemoryAuditSink::new());
        let state = AppState::build(config, Arc::new(MemoryStore::new()), audit_sink.clone());
        let router = build_router(state.clone());
        Self {
            router,
            state,
            audit_sink,
        }
    }

    /// Seed an account with a credential. Returns the account ID.
    pub async fn create_account(&self, email: &str, role: Role, password: &str) -> Uuid {
        let account = self
            .state
            .accounts
            .create(Account::new(email, role))
            .await
            .expect("failed to seed account");
        self.state
            .credentials
            .register(account.id, password)
            .await
            .expect("failed to seed credential");
        account.id
    }

    /// Fetch an encoded CSRF token from the issuance endpoint.
    pub async fn csrf_token(&self) -> String {
        let response = self.send(self.get("/api/auth/csrf")).await;
        assert_eq!(response.status, StatusCode::OK, "csrf issuance failed");
        response.body["data"]["token"]
            .as_str()
            .expect("csrf token missing")
            .to_string()
    }

    /// Make a request with the default device context. Non-GET requests
    /// automatically carry a fresh, matching CSRF header/cookie pair.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_as_device(method, path, body, token, TEST_UA, TEST_IP)
            .await
    }

    /// Like [`Self::request`] but from a specific device context.
    pub async fn request_as_device(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        user_agent: &str,
        ip: &str,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("user-agent", user_agent)
            .header("x-forwarded-for", ip);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        if method != "GET" {
            let csrf = self.csrf_token().await;
            builder = builder
                .header("x-csrf-token", &csrf)
                .header("cookie", format!("mb_csrf={csrf}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("failed to build request"),
            None => builder.body(Body::empty()).expect("failed to build request"),
        };

        self.send(request).await
    }

    /// Make a request with explicit CSRF material (csrf-specific tests).
    pub async fn request_with_csrf(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        csrf_header: Option<&str>,
        csrf_cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("user-agent", TEST_UA)
            .header("x-forwarded-for", TEST_IP);

        if let Some(header) = csrf_header {
            builder = builder.header("x-csrf-token", header);
        }
        if let Some(cookie) = csrf_cookie {
            builder = builder.header("cookie", format!("mb_csrf={cookie}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("failed to build request"),
            None => builder.body(Body::empty()).expect("failed to build request"),
        };

        self.send(request).await
    }

    /// Login and return `(access_token, refresh_token)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        let access = response.body["data"]["access_token"]
            .as_str()
            .expect("access token missing")
            .to_string();
        let refresh = response.body["data"]["refresh_token"]
            .as_str()
            .expect("refresh token missing")
            .to_string();
        (access, refresh)
    }

    fn get(&self, path: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(path)
            .header("user-agent", TEST_UA)
            .header("x-forwarded-for", TEST_IP)
            .body(Body::empty())
            .expect("failed to build request")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
