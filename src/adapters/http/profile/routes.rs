//! Routes for profile endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_profile, delete_profile, get_profile, list_profiles, my_profile, public_profile,
    sync_github, update_profile,
};
use crate::adapters::http::state::AppState;

/// - `GET|POST /profiles/`
/// - `GET /profiles/my-profile/`, alias `GET /my-profile/`
/// - `GET|PUT|PATCH|DELETE /profiles/:id/`
/// - `POST /profiles/:id/sync_github/`
/// - `GET /public/profile/:username/` (no auth)
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/", get(list_profiles).post(create_profile))
        .route("/profiles/my-profile/", get(my_profile))
        .route(
            "/profiles/:id/",
            get(get_profile)
                .put(update_profile)
                .patch(update_profile)
                .delete(delete_profile),
        )
        .route("/profiles/:id/sync_github/", post(sync_github))
        .route("/my-profile/", get(my_profile))
        .route("/public/profile/:username/", get(public_profile))
}
