//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
///
/// Authentication is enforced per handler by the `AuthUser` extractor, so
/// public and protected routes can share a path (`/threads/{thread_id}`).
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/users", user_routes())
        .nest("/authentications", authentication_routes())
        .nest("/threads", thread_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// User registration (public)
fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(handlers::user::register))
}

/// Login, token refresh and logout (public)
fn authentication_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        post(handlers::auth::login)
            .put(handlers::auth::refresh_token)
            .delete(handlers::auth::logout),
    )
}

/// Threads, comments and replies
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::thread::create_thread))
        .route("/{thread_id}", get(handlers::thread::get_thread))
        .route(
            "/{thread_id}/comments",
            post(handlers::comment::create_comment),
        )
        .route(
            "/{thread_id}/comments/{comment_id}",
            delete(handlers::comment::delete_comment),
        )
        .route(
            "/{thread_id}/comments/{comment_id}/replies",
            post(handlers::comment::create_reply),
        )
        .route(
            "/{thread_id}/comments/{comment_id}/replies/{reply_id}",
            delete(handlers::comment::delete_reply),
        )
}
