//! HTTP handlers for profile endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::{
    CreateProfileCommand, DeleteProfileCommand, GetOrCreateProfileQuery, GetProfileQuery,
    ListProfilesQuery, SyncGitHubCommand, UpdateProfileCommand, ViewPublicProfileQuery,
};
use crate::domain::foundation::{DomainError, ErrorCode, ProfileId};

use super::dto::{ProfileFieldsRequest, ProfileResponse, SyncRequest};

/// Unparseable ids cannot name an existing profile.
fn parse_profile_id(raw: &str) -> Result<ProfileId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError(DomainError::new(
            ErrorCode::ProfileNotFound,
            format!("Profile not found: {}", raw),
        ))
    })
}

/// GET /api/profiles/
pub async fn list_profiles(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let views = state.list_profiles_handler().handle(ListProfilesQuery { viewer }).await?;
    let body: Vec<ProfileResponse> = views.iter().map(ProfileResponse::from).collect();
    Ok(Json(body))
}

/// POST /api/profiles/
pub async fn create_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<ProfileFieldsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateProfileCommand {
        user,
        fields: req.into(),
    };
    let view = state.create_profile_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(&view))))
}

/// GET /api/profiles/my-profile/ and GET /api/my-profile/
pub async fn my_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .get_or_create_profile_handler()
        .handle(GetOrCreateProfileQuery { user })
        .await?;
    Ok(Json(ProfileResponse::from(&view)))
}

/// GET /api/profiles/{id}/
pub async fn get_profile(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetProfileQuery {
        profile_id: parse_profile_id(&id)?,
        viewer,
    };
    let view = state.get_profile_handler().handle(query).await?;
    Ok(Json(ProfileResponse::from(&view)))
}

/// PUT / PATCH /api/profiles/{id}/
///
/// Both verbs apply only the fields present in the body.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ProfileFieldsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateProfileCommand {
        profile_id: parse_profile_id(&id)?,
        requested_by: user,
        changes: req.into(),
    };
    let view = state.update_profile_handler().handle(cmd).await?;
    Ok(Json(ProfileResponse::from(&view)))
}

/// DELETE /api/profiles/{id}/
pub async fn delete_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteProfileCommand {
        profile_id: parse_profile_id(&id)?,
        requested_by: user,
    };
    state.delete_profile_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/profiles/{id}/sync_github/
pub async fn sync_github(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<SyncRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SyncGitHubCommand {
        profile_id: parse_profile_id(&id)?,
        requested_by: user,
        force: req.force,
    };
    let result = state.sync_github_handler().handle(cmd).await?;
    Ok(Json(result))
}

/// GET /api/public/profile/{username}/
pub async fn public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .view_public_profile_handler()
        .handle(ViewPublicProfileQuery { username })
        .await?;
    Ok(Json(ProfileResponse::from(&view)))
}
