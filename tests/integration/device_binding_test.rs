//! Device fingerprint binding tests: a stolen token must fail from a
//! different device or network even though it is cryptographically valid.

use axum::http::StatusCode;

use movebase_entity::account::Role;

use crate::helpers::{STRONG_PASSWORD, TEST_IP, TEST_UA, TestApp};

#[tokio::test]
async fn test_access_token_replayed_from_another_ip_fails() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let same_device = app
        .request_as_device("GET", "/api/auth/me", None, Some(&access), TEST_UA, TEST_IP)
        .await;
    assert_eq!(same_device.status, StatusCode::OK);

    let other_network = app
        .request_as_device(
            "GET",
            "/api/auth/me",
            None,
            Some(&access),
            TEST_UA,
            "203.0.113.77",
        )
        .await;
    assert_eq!(other_network.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_replayed_from_another_user_agent_fails() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let other_agent = app
        .request_as_device(
            "GET",
            "/api/auth/me",
            None,
            Some(&access),
            "curl/8.5.0",
            TEST_IP,
        )
        .await;
    assert_eq!(other_agent.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_bound_to_the_device_too() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (_, refresh) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let stolen = app
        .request_as_device(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
            "curl/8.5.0",
            "203.0.113.77",
        )
        .await;
    assert_eq!(stolen.status, StatusCode::UNAUTHORIZED);

    // A failed replay must not have consumed the token: the legitimate
    // device still rotates successfully.
    let legitimate = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(legitimate.status, StatusCode::OK);
}
