//! Refresh token rotation tests, including the duplicate-rotation race.

use axum::http::StatusCode;

use movebase_entity::account::Role;

use crate::helpers::{STRONG_PASSWORD, TEST_IP, TEST_UA, TestApp};

#[tokio::test]
async fn test_refresh_returns_a_working_pair() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (_, refresh) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The new access token resolves identity.
    let new_access = response.body["data"]["access_token"].as_str().unwrap();
    let me = app
        .request("GET", "/api/auth/me", None, Some(new_access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_rotated_refresh_token_dies_exactly_once() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (_, refresh) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let first = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    // Replaying the consumed token fails even though its signature and
    // expiry are still fine: its hash carries reason `rotated`.
    let second = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_duplicate_rotation_yields_one_winner() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (_, refresh) = app.login("customer@example.com", STRONG_PASSWORD).await;

    // Drive the rotator directly so both calls race inside the engine.
    let rotator = app.state.token_rotator.clone();
    let (a, b) = tokio::join!(
        rotator.rotate(&refresh, Some(TEST_UA), TEST_IP),
        rotator.rotate(&refresh, Some(TEST_UA), TEST_IP),
    );

    let a = a.unwrap();
    let b = b.unwrap();
    assert!(
        a.is_some() ^ b.is_some(),
        "exactly one rotation must win, got winner_a={} winner_b={}",
        a.is_some(),
        b.is_some()
    );
}

#[tokio::test]
async fn test_rotation_keeps_the_session_alive() {
    let app = TestApp::new();
    let user_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (_, refresh) = app.login("customer@example.com", STRONG_PASSWORD).await;

    assert_eq!(app.state.sessions.count_active_sessions(user_id).await.unwrap(), 1);

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Rotation rebinds the existing session rather than creating one.
    assert_eq!(app.state.sessions.count_active_sessions(user_id).await.unwrap(), 1);

    // And the session now answers to the new refresh token.
    let new_refresh = response.body["data"]["refresh_token"].as_str().unwrap();
    let again = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": new_refresh })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_access_token_cannot_be_used_as_refresh_token() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
