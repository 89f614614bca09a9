//! Assembly of the REST API router.

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{auth_middleware, AuthState};
use super::profile::profile_routes;
use super::skill::skill_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every resource mounted under `/api`, plus `/health`.
///
/// The auth middleware runs on all routes; handlers decide whether a user
/// is required.
///
/// ```ignore
/// let app = api_router(AppState::new(profiles, skills, github, policy), validator);
/// ```
pub fn api_router(state: AppState, validator: AuthState) -> Router {
    let api = Router::new().merge(profile_routes()).merge(skill_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .with_state(state)
}

/// Adds request tracing, CORS and the request timeout.
pub fn with_http_layers(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// No configured origins means no cross-origin access.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
