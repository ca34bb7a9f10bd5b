//! Rate limiter middleware tests.

use axum::http::StatusCode;

use movebase_core::config::AppConfig;

use crate::helpers::TestApp;

/// Config with a burst bucket tight enough to trip in a test.
fn tight_config(burst: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.rate_limit.capacity = 1000;
    config.rate_limit.refill_per_second = 1000.0;
    config.rate_limit.burst_capacity = burst;
    config.rate_limit.burst_window_seconds = 60;
    config
}

#[tokio::test]
async fn test_burst_exhaustion_returns_429_with_retry_after() {
    let app = TestApp::with_config(tight_config(3));

    for _ in 0..3 {
        let ok = app.request("GET", "/api/auth/me", None, None).await;
        // Unauthenticated, but admitted by the limiter.
        assert_eq!(ok.status, StatusCode::UNAUTHORIZED);
    }

    let denied = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(denied.status, StatusCode::TOO_MANY_REQUESTS);

    let retry_after = denied
        .headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .expect("missing retry-after header");
    assert!(retry_after >= 1);
}

#[tokio::test]
async fn test_health_bypasses_the_buckets() {
    let app = TestApp::with_config(tight_config(2));

    // Far more calls than the burst bucket would admit.
    for _ in 0..10 {
        let response = app.request("GET", "/api/health", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_keys_separate_by_client_ip() {
    let app = TestApp::with_config(tight_config(2));

    for _ in 0..2 {
        app.request_as_device("GET", "/api/auth/me", None, None, "ua", "10.0.0.1")
            .await;
    }
    let denied = app
        .request_as_device("GET", "/api/auth/me", None, None, "ua", "10.0.0.1")
        .await;
    assert_eq!(denied.status, StatusCode::TOO_MANY_REQUESTS);

    // A different client IP gets its own buckets.
    let other = app
        .request_as_device("GET", "/api/auth/me", None, None, "ua", "10.0.0.2")
        .await;
    assert_eq!(other.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_key_takes_precedence_over_ip() {
    let app = TestApp::with_config(tight_config(2));

    // Exhaust the bare-IP buckets.
    for _ in 0..3 {
        app.request("GET", "/api/auth/me", None, None).await;
    }

    // Same IP, but an API key resolves to a different bucket key.
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("user-agent", crate::helpers::TEST_UA)
        .header("x-forwarded-for", crate::helpers::TEST_IP)
        .header("x-api-key", "partner-key-1")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
