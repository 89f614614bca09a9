//! Routes for `/skills/`.

use axum::routing::get;
use axum::Router;

use super::handlers::{create_skill, delete_skill, get_skill, list_skills, update_skill};
use crate::adapters::http::state::AppState;

/// - `GET /skills/` / `POST /skills/`
/// - `GET|PUT|PATCH|DELETE /skills/:id/`
pub fn skill_routes() -> Router<AppState> {
    Router::new()
        .route("/skills/", get(list_skills).post(create_skill))
        .route(
            "/skills/:id/",
            get(get_skill)
                .put(update_skill)
                .patch(update_skill)
                .delete(delete_skill),
        )
}
