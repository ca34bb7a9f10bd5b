//! Permission engine tests over the administrative HTTP surface, plus
//! the server-side ownership filter.

use axum::http::StatusCode;
use uuid::Uuid;

use movebase_auth::rbac::{Owned, Permission};
use movebase_entity::account::Role;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_manager_can_list_sessions_customer_cannot() {
    let app = TestApp::new();
    let customer_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    app.create_account("manager@example.com", Role::Manager, STRONG_PASSWORD)
        .await;

    app.login("customer@example.com", STRONG_PASSWORD).await;
    let (manager_access, _) = app.login("manager@example.com", STRONG_PASSWORD).await;
    let (customer_access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;

    let allowed = app
        .request(
            "GET",
            &format!("/api/admin/sessions/{customer_id}"),
            None,
            Some(&manager_access),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["data"].as_array().unwrap().len(), 2);

    let denied = app
        .request(
            "GET",
            &format!("/api/admin/sessions/{customer_id}"),
            None,
            Some(&customer_access),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manager_cannot_revoke_sessions_admin_can() {
    let app = TestApp::new();
    let customer_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    app.create_account("manager@example.com", Role::Manager, STRONG_PASSWORD)
        .await;
    app.create_account("admin@example.com", Role::Admin, STRONG_PASSWORD)
        .await;

    let (customer_access, _) = app.login("customer@example.com", STRONG_PASSWORD).await;
    let (manager_access, _) = app.login("manager@example.com", STRONG_PASSWORD).await;
    let (admin_access, _) = app.login("admin@example.com", STRONG_PASSWORD).await;

    // SessionRevokeAll is not in the manager table.
    let denied = app
        .request(
            "POST",
            &format!("/api/admin/sessions/{customer_id}/revoke"),
            Some(serde_json::json!({ "reason": "suspicious activity" })),
            Some(&manager_access),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    // Admin holds every permission unconditionally.
    let allowed = app
        .request(
            "POST",
            &format!("/api/admin/sessions/{customer_id}/revoke"),
            Some(serde_json::json!({ "reason": "suspicious activity" })),
            Some(&admin_access),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["data"]["sessions_revoked"], 1);

    // The customer's session died with the incident response.
    let dead = app
        .request("GET", "/api/auth/me", None, Some(&customer_access))
        .await;
    assert_eq!(dead.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_revocation_is_audited_with_the_reason() {
    let app = TestApp::new();
    let customer_id = app
        .create_account("customer@example.com", Role::Customer, STRONG_PASSWORD)
        .await;
    app.create_account("admin@example.com", Role::Admin, STRONG_PASSWORD)
        .await;
    let (admin_access, _) = app.login("admin@example.com", STRONG_PASSWORD).await;

    app.request(
        "POST",
        &format!("/api/admin/sessions/{customer_id}/revoke"),
        Some(serde_json::json!({ "reason": "credential stuffing" })),
        Some(&admin_access),
    )
    .await;

    let entries = app.audit_sink.entries().await;
    let entry = entries
        .iter()
        .find(|e| e.action == "admin.revoke_all_sessions")
        .expect("no audit entry for admin revocation");
    assert_eq!(entry.resource_id.as_deref(), Some(customer_id.to_string()).as_deref());
    assert_eq!(entry.changes.len(), 1);
    assert_eq!(
        entry.changes[0].new,
        Some(serde_json::Value::String("credential stuffing".to_string()))
    );
}

// ── Ownership filtering (library-level; no HTTP surface of its own) ──

struct BookingRow {
    owner: Uuid,
}

impl Owned for BookingRow {
    fn owner_id(&self) -> Uuid {
        self.owner
    }
}

#[tokio::test]
async fn test_listing_filter_returns_exactly_the_callers_rows() {
    let app = TestApp::new();
    let me = Uuid::new_v4();
    let someone_else = Uuid::new_v4();

    let rows = vec![
        BookingRow { owner: me },
        BookingRow { owner: someone_else },
        BookingRow { owner: me },
        BookingRow { owner: someone_else },
    ];

    let mine = app.state.rbac.filter_owned(
        rows,
        &Role::Customer,
        me,
        &Permission::BookingView,
    );
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|row| row.owner == me));
}

#[tokio::test]
async fn test_listing_filter_gives_admin_every_row() {
    let app = TestApp::new();
    let admin_subject = Uuid::new_v4();

    let rows = vec![
        BookingRow { owner: Uuid::new_v4() },
        BookingRow { owner: Uuid::new_v4() },
        BookingRow { owner: Uuid::new_v4() },
    ];

    let all = app.state.rbac.filter_owned(
        rows,
        &Role::Admin,
        admin_subject,
        &Permission::BookingView,
    );
    assert_eq!(all.len(), 3);
}
