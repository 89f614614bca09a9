//! PostgreSQL implementation of ProfileRepository.
//!
//! The GitHub snapshot lives in a single `JSONB` column so that a sync
//! replaces it with one `UPDATE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, Timestamp, UserId};
use crate::domain::profile::{Profile, ProfileParts, SyncSnapshot, Theme};
use crate::domain::skill::{SkillCategory, SkillDraft};
use crate::ports::ProfileRepository;

use super::skill_repository::{delete_in_categories, upsert_by_name};

const PROFILE_COLUMNS: &str = "id, user_id, username, github_username, bio, headline, location, \
     website, avatar_url, theme, is_public, views, last_sync, created_at, updated_at";

/// PostgreSQL implementation of the ProfileRepository port.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a profile.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: String,
    username: String,
    github_username: Option<String>,
    bio: String,
    headline: String,
    location: String,
    website: String,
    avatar_url: Option<String>,
    theme: String,
    is_public: bool,
    views: i64,
    last_sync: Option<Json<SyncSnapshot>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?;
        let theme: Theme = row.theme.parse().map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid theme value: {}", row.theme))
        })?;

        Ok(Profile::reconstitute(ProfileParts {
            id: ProfileId::from_uuid(row.id),
            user_id,
            username: row.username,
            github_username: row.github_username,
            bio: row.bio,
            headline: row.headline,
            location: row.location,
            website: row.website,
            avatar_url: row.avatar_url,
            theme,
            is_public: row.is_public,
            views: u64::try_from(row.views).unwrap_or_default(),
            last_sync: row.last_sync.map(|Json(snapshot)| snapshot),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }))
    }
}

fn not_found(id: ProfileId) -> DomainError {
    DomainError::new(ErrorCode::ProfileNotFound, format!("Profile not found: {}", id))
}

fn begin_error(e: sqlx::Error) -> DomainError {
    DomainError::database("Failed to begin transaction", e)
}

fn commit_error(e: sqlx::Error) -> DomainError {
    DomainError::database("Failed to commit transaction", e)
}

/// Writes every editable column. `views` and `created_at` are never touched.
async fn overwrite(conn: &mut PgConnection, profile: &Profile) -> Result<(), DomainError> {
    let p = profile.parts();

    let result = sqlx::query(
        r#"
        UPDATE profiles SET
            github_username = $2,
            bio = $3,
            headline = $4,
            location = $5,
            website = $6,
            avatar_url = $7,
            theme = $8,
            is_public = $9,
            last_sync = $10,
            updated_at = $11
        WHERE id = $1
        "#,
    )
    .bind(p.id.as_uuid())
    .bind(&p.github_username)
    .bind(&p.bio)
    .bind(&p.headline)
    .bind(&p.location)
    .bind(&p.website)
    .bind(&p.avatar_url)
    .bind(p.theme.as_str())
    .bind(p.is_public)
    .bind(p.last_sync.as_ref().map(Json))
    .bind(p.updated_at.as_datetime())
    .execute(conn)
    .await
    .map_err(|e| DomainError::database("Failed to update profile", e))?;

    if result.rows_affected() == 0 {
        return Err(not_found(p.id));
    }
    Ok(())
}

fn to_profiles(rows: Vec<ProfileRow>) -> Result<Vec<Profile>, DomainError> {
    rows.into_iter().map(Profile::try_from).collect()
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: &Profile) -> Result<(), DomainError> {
        let p = profile.parts();

        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, user_id, username, github_username, bio, headline, location,
                website, avatar_url, theme, is_public, views, last_sync, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(p.id.as_uuid())
        .bind(p.user_id.as_str())
        .bind(&p.username)
        .bind(&p.github_username)
        .bind(&p.bio)
        .bind(&p.headline)
        .bind(&p.location)
        .bind(&p.website)
        .bind(&p.avatar_url)
        .bind(p.theme.as_str())
        .bind(p.is_public)
        .bind(i64::try_from(p.views).unwrap_or(i64::MAX))
        .bind(p.last_sync.as_ref().map(Json))
        .bind(p.created_at.as_datetime())
        .bind(p.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("profiles_user_id_key") {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        "A profile already exists for this user",
                    );
                }
            }
            DomainError::database("Failed to create profile", e)
        })?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DomainError::database("Failed to acquire connection", e))?;
        overwrite(&mut *conn, profile).await
    }

    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> =
            sqlx::query_as(&format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find profile", e))?;

        row.map(Profile::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> =
            sqlx::query_as(&format!("SELECT {} FROM profiles WHERE user_id = $1", PROFILE_COLUMNS))
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find profile", e))?;

        row.map(Profile::try_from).transpose()
    }

    async fn find_public_by_username(&self, username: &str) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE username = $1 AND is_public ORDER BY created_at LIMIT 1",
            PROFILE_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find profile", e))?;

        row.map(Profile::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles ORDER BY created_at, id",
            PROFILE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list profiles", e))?;

        to_profiles(rows)
    }

    async fn list_visible_to(&self, viewer: Option<&UserId>) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE is_public OR user_id = $1 ORDER BY created_at, id",
            PROFILE_COLUMNS
        ))
        .bind(viewer.map(UserId::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list profiles", e))?;

        to_profiles(rows)
    }

    async fn apply_sync(
        &self,
        id: ProfileId,
        snapshot: &SyncSnapshot,
        skills: &[SkillDraft],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        let result = sqlx::query(
            r#"
            UPDATE profiles SET last_sync = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(Json(snapshot))
        .bind(snapshot.synced_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to save GitHub snapshot", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        for draft in skills {
            upsert_by_name(&mut *tx, id, draft).await?;
        }

        tx.commit().await.map_err(commit_error)
    }

    async fn update_dropping_skills(
        &self,
        profile: &Profile,
        categories: &[SkillCategory],
    ) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        overwrite(&mut *tx, profile).await?;
        let removed = delete_in_categories(&mut *tx, profile.id(), categories).await?;

        tx.commit().await.map_err(commit_error)?;
        Ok(removed)
    }

    async fn increment_views(&self, id: ProfileId) -> Result<u64, DomainError> {
        let views: Option<i64> = sqlx::query_scalar(
            "UPDATE profiles SET views = views + 1 WHERE id = $1 RETURNING views",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to count profile view", e))?;

        views
            .map(|v| u64::try_from(v).unwrap_or_default())
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: ProfileId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete profile", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
