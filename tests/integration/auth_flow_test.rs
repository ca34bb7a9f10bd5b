//! End-to-end authentication flow tests.

use axum::http::StatusCode;

use movebase_entity::account::Role;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success_returns_token_pair() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "customer@example.com",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"]["refresh_token"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "customer@example.com",
                "password": "wrong-password",
            })),
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    // Same body either way: no oracle for which part was wrong.
    assert_eq!(
        wrong_password.body["message"],
        unknown_email.body["message"]
    );
}

#[tokio::test]
async fn test_me_resolves_identity() {
    let app = TestApp::new();
    app.create_account("mover@example.com", Role::Mover, STRONG_PASSWORD)
        .await;
    let (access, _) = app.login("mover@example.com", STRONG_PASSWORD).await;

    let response = app
        .request("GET", "/api/auth/me", None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "mover@example.com");
    assert_eq!(response.body["data"]["role"], "mover");
}

#[tokio::test]
async fn test_identity_route_serves_anonymous_without_error() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    // No token: anonymous context, not a 401.
    let anonymous = app.request("GET", "/api/auth/identity", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert!(anonymous.body["data"].is_null());

    // With a token: resolved identity.
    let (access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let resolved = app
        .request("GET", "/api/auth/identity", None, Some(&access))
        .await;
    assert_eq!(resolved.status, StatusCode::OK);
    assert_eq!(resolved.body["data"]["email"], "customer@example.com");
}

#[tokio::test]
async fn test_me_without_token_is_401() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_401() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/auth/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_kills_the_access_token() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    // Works before logout.
    let before = app
        .request("GET", "/api/auth/me", None, Some(&access))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&access))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    // The identical call with the identical token now fails: its hash
    // is in the revocation registry despite being cryptographically
    // valid and unexpired.
    let after = app
        .request("GET", "/api/auth/me", None, Some(&access))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_kills_the_refresh_token_too() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (access, refresh) = app.login("customer@example.com", STRONG_PASSWORD).await;

    app.request("POST", "/api/auth/logout", None, Some(&access))
        .await;

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_suspended_account_cannot_login() {
    let app = TestApp::new();
    let account = app
        .state
        .accounts
        .create({
            let mut acct =
                movebase_entity::account::Account::new("frozen@example.com", Role::Customer);
            acct.status = movebase_entity::account::AccountStatus::Suspended;
            acct
        })
        .await
        .unwrap();
    app.state
        .credentials
        .register(account.id, STRONG_PASSWORD)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "frozen@example.com",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_lockout_after_repeated_failures() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;

    for _ in 0..5 {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": "customer@example.com",
                    "password": "wrong-password",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    // Correct password now hits the lockout.
    let locked = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "customer@example.com",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(locked.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_successful_login_is_audited() {
    let app = TestApp::new();
    let user_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    app.login("customer@example.com", STRONG_PASSWORD).await;

    let entries = app.audit_sink.entries().await;
    let login_entry = entries
        .iter()
        .find(|e| e.action == "auth.login" && e.success)
        .expect("no successful login audit entry");
    assert_eq!(login_entry.actor_id, Some(user_id));
}

#[tokio::test]
async fn test_password_validation_contract() {
    let app = TestApp::new();

    let weak = app
        .request(
            "POST",
            "/api/auth/password/validate",
            Some(serde_json::json!({ "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::OK);
    assert_eq!(weak.body["data"]["is_valid"], false);
    assert!(weak.body["data"]["errors"].as_array().unwrap().len() >= 3);

    let strong = app
        .request(
            "POST",
            "/api/auth/password/validate",
            Some(serde_json::json!({ "password": STRONG_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(strong.body["data"]["is_valid"], true);
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = TestApp::new();
    app.create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    let (access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let changed = app
        .request(
            "POST",
            "/api/auth/password",
            Some(serde_json::json!({
                "current_password": STRONG_PASSWORD,
                "new_password": "Gl0bal^Harbor&Pine",
            })),
            Some(&access),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);
    assert_eq!(changed.body["data"]["is_valid"], true);

    // Old password no longer logs in; new one does.
    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "customer@example.com",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("customer@example.com", "Gl0bal^Harbor&Pine").await;
}
