//! CSRF double-submit enforcement tests.

use axum::http::StatusCode;

use crate::helpers::TestApp;

fn body() -> serde_json::Value {
    serde_json::json!({ "password": "whatever" })
}

#[tokio::test]
async fn test_issuance_sets_cookie_and_body_token() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/auth/csrf", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["data"]["token"].as_str().unwrap();
    let cookie = response
        .headers
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("no set-cookie header");
    assert!(cookie.starts_with("mb_csrf="));
    assert!(cookie.contains(token));
    assert!(cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn test_state_changing_request_without_token_is_denied() {
    let app = TestApp::new();
    let response = app
        .request_with_csrf("POST", "/api/auth/password/validate", Some(body()), None, None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_header_without_cookie_is_denied() {
    let app = TestApp::new();
    let token = app.csrf_token().await;
    let response = app
        .request_with_csrf(
            "POST",
            "/api/auth/password/validate",
            Some(body()),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mismatched_header_and_cookie_are_denied() {
    let app = TestApp::new();
    let token_a = app.csrf_token().await;
    let token_b = app.csrf_token().await;

    let response = app
        .request_with_csrf(
            "POST",
            "/api/auth/password/validate",
            Some(body()),
            Some(&token_a),
            Some(&token_b),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_matching_valid_pair_is_admitted() {
    let app = TestApp::new();
    let token = app.csrf_token().await;

    let response = app
        .request_with_csrf(
            "POST",
            "/api/auth/password/validate",
            Some(body()),
            Some(&token),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_tampered_token_is_denied_even_when_double_submitted() {
    let app = TestApp::new();
    let token = app.csrf_token().await;

    // Flip one character; cookie and header still match each other, but
    // the HMAC no longer verifies.
    let mut tampered = token.clone().into_bytes();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == b'0' { b'1' } else { b'0' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app
        .request_with_csrf(
            "POST",
            "/api/auth/password/validate",
            Some(body()),
            Some(&tampered),
            Some(&tampered),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_requests_are_exempt() {
    let app = TestApp::new();
    // No CSRF material at all on a GET.
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}
