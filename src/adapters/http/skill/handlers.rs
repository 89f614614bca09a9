//! HTTP handlers for skill endpoints. Every route works on the caller's own
//! profile.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::{
    CreateSkillCommand, DeleteSkillCommand, GetSkillQuery, ListSkillsQuery, UpdateSkillCommand,
};
use crate::domain::foundation::{DomainError, ErrorCode, SkillId};

use super::dto::{CreateSkillRequest, SkillResponse, UpdateSkillRequest};

/// Unparseable ids cannot name an existing skill.
fn parse_skill_id(raw: &str) -> Result<SkillId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError(DomainError::new(
            ErrorCode::SkillNotFound,
            format!("Skill not found: {}", raw),
        ))
    })
}

/// GET /api/skills/
pub async fn list_skills(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let skills = state.list_skills_handler().handle(ListSkillsQuery { user }).await?;
    let body: Vec<SkillResponse> = skills.iter().map(SkillResponse::from).collect();
    Ok(Json(body))
}

/// POST /api/skills/
pub async fn create_skill(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<CreateSkillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateSkillCommand {
        user,
        name: req.name,
        category: req.category,
        level: req.level,
        order: req.order,
    };
    let skill = state.create_skill_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(SkillResponse::from(&skill))))
}

/// GET /api/skills/{id}/
pub async fn get_skill(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let skill_id = parse_skill_id(&id)?;
    let skill = state.get_skill_handler().handle(GetSkillQuery { user, skill_id }).await?;
    Ok(Json(SkillResponse::from(&skill)))
}

/// PUT / PATCH /api/skills/{id}/
pub async fn update_skill(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateSkillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateSkillCommand {
        user,
        skill_id: parse_skill_id(&id)?,
        name: req.name,
        category: req.category,
        level: req.level,
        order: req.order,
    };
    let skill = state.update_skill_handler().handle(cmd).await?;
    Ok(Json(SkillResponse::from(&skill)))
}

/// DELETE /api/skills/{id}/
pub async fn delete_skill(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let skill_id = parse_skill_id(&id)?;
    state.delete_skill_handler().handle(DeleteSkillCommand { user, skill_id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
