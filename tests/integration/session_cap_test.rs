//! Session concurrency cap and eviction ordering tests.

use axum::http::StatusCode;

use movebase_entity::account::Role;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_cap_holds_after_every_login() {
    let app = TestApp::new();
    let user_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    for i in 1..=5 {
        app.login("customer@example.com", STRONG_PASSWORD).await;
        let active = app
            .state
            .sessions
            .count_active_sessions(user_id)
            .await
            .unwrap();
        assert!(
            active <= 3,
            "cap violated after login {i}: {active} active sessions"
        );
    }
}

#[tokio::test]
async fn test_fourth_login_leaves_exactly_three_and_evicts_the_oldest() {
    let app = TestApp::new();
    let user_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    let (access1, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let (access2, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let (access3, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    // Touch sessions 1 and 2 so session 3 holds the oldest activity.
    app.request("GET", "/api/auth/me", None, Some(&access1)).await;
    app.request("GET", "/api/auth/me", None, Some(&access2)).await;

    let (access4, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    assert_eq!(
        app.state
            .sessions
            .count_active_sessions(user_id)
            .await
            .unwrap(),
        3
    );

    // The least-recently-active session (3) was evicted; its access
    // token is cut off at the session check.
    let evicted = app.request("GET", "/api/auth/me", None, Some(&access3)).await;
    assert_eq!(evicted.status, StatusCode::UNAUTHORIZED);

    // The survivors still work.
    for access in [&access1, &access2, &access4] {
        let ok = app.request("GET", "/api/auth/me", None, Some(access)).await;
        assert_eq!(ok.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_eviction_ties_break_by_creation_order() {
    let app = TestApp::new();
    let user_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    // Three logins, nobody touches anything: all activity markers sit at
    // their creation instants, so the first-created session is evicted.
    let (access1, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let (access2, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let (access3, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let (access4, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    assert_eq!(
        app.state
            .sessions
            .count_active_sessions(user_id)
            .await
            .unwrap(),
        3
    );

    let evicted = app.request("GET", "/api/auth/me", None, Some(&access1)).await;
    assert_eq!(evicted.status, StatusCode::UNAUTHORIZED);

    for access in [&access2, &access3, &access4] {
        let ok = app.request("GET", "/api/auth/me", None, Some(access)).await;
        assert_eq!(ok.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_evicted_sessions_refresh_token_is_dead() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    let (_, refresh1) = app.login("customer@example.com", STRONG_PASSWORD).await;
    for _ in 0..3 {
        app.login("customer@example.com", STRONG_PASSWORD).await;
    }

    // Session 1 was evicted; its refresh token hash was revoked in the
    // same teardown.
    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh1 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_all_revokes_every_session() {
    let app = TestApp::new();
    let user_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    let (access1, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let (access2, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let response = app
        .request("POST", "/api/auth/logout-all", None, Some(&access2))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["sessions_revoked"], 2);

    assert_eq!(
        app.state
            .sessions
            .count_active_sessions(user_id)
            .await
            .unwrap(),
        0
    );

    for access in [&access1, &access2] {
        let dead = app.request("GET", "/api/auth/me", None, Some(access)).await;
        assert_eq!(dead.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_cap_is_per_user() {
    let app = TestApp::new();
    let alice = app
        .create_account("alice@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let bob = app
        .create_account("bob@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    for _ in 0..3 {
        app.login("alice@example.com", STRONG_PASSWORD).await;
        app.login("bob@example.com", STRONG_PASSWORD).await;
    }

    assert_eq!(app.state.sessions.count_active_sessions(alice).await.unwrap(), 3);
    assert_eq!(app.state.sessions.count_active_sessions(bob).await.unwrap(), 3);
}
