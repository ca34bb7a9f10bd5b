//! Route definitions for the MoveBase security engine HTTP surface.
//!
//! All routes are mounted under `/api`. The middleware stack runs in the
//! engine's request order: logging → deadline → rate limit → CSRF →
//! handler (identity resolution and permission checks happen inside the
//! handlers via extractors).

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    // Layers execute outermost-last-added: logging wraps the deadline,
    // which wraps rate limiting, which wraps CSRF.
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::csrf::csrf_protect,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::deadline::request_deadline,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Auth lifecycle endpoints.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/logout-all", post(handlers::auth::logout_all))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/identity", get(handlers::auth::identity))
        .route("/auth/csrf", get(handlers::csrf::issue_token))
        .route(
            "/auth/password/validate",
            post(handlers::auth::validate_password),
        )
        .route("/auth/password", post(handlers::auth::change_password))
}

/// Administrative session endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/sessions/{user_id}",
            get(handlers::admin::list_user_sessions),
        )
        .route(
            "/admin/sessions/{user_id}/revoke",
            post(handlers::admin::revoke_user_sessions),
        )
}

/// Health endpoints (bypass rate limiting).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// CORS restricted to the configured origin allow-list.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static("x-csrf-token"),
        ])
}
