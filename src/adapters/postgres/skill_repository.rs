//! PostgreSQL implementation of SkillRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, SkillId, Timestamp};
use crate::domain::skill::{Skill, SkillCategory, SkillDraft, SkillLevel};
use crate::ports::SkillRepository;

/// PostgreSQL implementation of the SkillRepository port.
pub struct PostgresSkillRepository {
    pool: PgPool,
}

impl PostgresSkillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SkillRow {
    id: Uuid,
    profile_id: Uuid,
    name: String,
    category: String,
    level: i16,
    display_order: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<SkillRow> for Skill {
    type Error = DomainError;

    fn try_from(row: SkillRow) -> Result<Self, Self::Error> {
        let category: SkillCategory = row.category.parse().map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid category value: {}", row.category))
        })?;
        let level = SkillLevel::new(i32::from(row.level)).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid level value: {}", e))
        })?;

        Ok(Skill::reconstitute(
            SkillId::from_uuid(row.id),
            ProfileId::from_uuid(row.profile_id),
            row.name,
            category,
            level,
            row.display_order,
            Timestamp::from_datetime(row.created_at),
        ))
    }
}

fn map_write_error(context: &str, name: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("skills_profile_id_name_key") => {
                return DomainError::new(
                    ErrorCode::Conflict,
                    format!("A skill named '{}' already exists on this profile", name),
                )
                .with_detail("field", "name");
            }
            Some("skills_profile_id_fkey") => {
                return DomainError::new(ErrorCode::ProfileNotFound, "Profile not found");
            }
            _ => {}
        }
    }
    DomainError::database(context, e)
}

fn level_column(level: SkillLevel) -> i16 {
    // 1..=5 always fits.
    level.value() as i16
}

/// Creates the skill named `draft.name` or overwrites its category, level
/// and order. Runs on the caller's connection so it can join a transaction.
pub(super) async fn upsert_by_name(
    conn: &mut PgConnection,
    profile_id: ProfileId,
    draft: &SkillDraft,
) -> Result<(), DomainError> {
    let candidate = Skill::new(profile_id, draft.clone())?;

    sqlx::query(
        r#"
        INSERT INTO skills (id, profile_id, name, category, level, display_order, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (profile_id, name) DO UPDATE SET
            category = EXCLUDED.category,
            level = EXCLUDED.level,
            display_order = EXCLUDED.display_order
        "#,
    )
    .bind(candidate.id().as_uuid())
    .bind(profile_id.as_uuid())
    .bind(candidate.name())
    .bind(candidate.category().as_str())
    .bind(level_column(candidate.level()))
    .bind(candidate.order())
    .bind(candidate.created_at().as_datetime())
    .execute(conn)
    .await
    .map_err(|e| map_write_error("Failed to upsert skill", candidate.name(), e))?;

    Ok(())
}

/// Removes the profile's skills in `categories`; returns how many.
pub(super) async fn delete_in_categories(
    conn: &mut PgConnection,
    profile_id: ProfileId,
    categories: &[SkillCategory],
) -> Result<u64, DomainError> {
    let categories: Vec<String> = categories.iter().map(|c| c.as_str().to_string()).collect();

    let result = sqlx::query("DELETE FROM skills WHERE profile_id = $1 AND category = ANY($2)")
        .bind(profile_id.as_uuid())
        .bind(categories)
        .execute(conn)
        .await
        .map_err(|e| DomainError::database("Failed to delete skills", e))?;

    Ok(result.rows_affected())
}

#[async_trait]
impl SkillRepository for PostgresSkillRepository {
    async fn create(&self, skill: &Skill) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO skills (id, profile_id, name, category, level, display_order, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(skill.id().as_uuid())
        .bind(skill.profile_id().as_uuid())
        .bind(skill.name())
        .bind(skill.category().as_str())
        .bind(level_column(skill.level()))
        .bind(skill.order())
        .bind(skill.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to create skill", skill.name(), e))?;

        Ok(())
    }

    async fn update(&self, skill: &Skill) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE skills SET name = $2, category = $3, level = $4, display_order = $5
            WHERE id = $1
            "#,
        )
        .bind(skill.id().as_uuid())
        .bind(skill.name())
        .bind(skill.category().as_str())
        .bind(level_column(skill.level()))
        .bind(skill.order())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update skill", skill.name(), e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SkillNotFound,
                format!("Skill not found: {}", skill.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SkillId) -> Result<Option<Skill>, DomainError> {
        let row: Option<SkillRow> = sqlx::query_as(
            r#"
            SELECT id, profile_id, name, category, level, display_order, created_at
            FROM skills
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find skill", e))?;

        row.map(Skill::try_from).transpose()
    }

    async fn list_by_profile(&self, profile_id: ProfileId) -> Result<Vec<Skill>, DomainError> {
        let rows: Vec<SkillRow> = sqlx::query_as(
            r#"
            SELECT id, profile_id, name, category, level, display_order, created_at
            FROM skills
            WHERE profile_id = $1
            ORDER BY display_order, name
            "#,
        )
        .bind(profile_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list skills", e))?;

        rows.into_iter().map(Skill::try_from).collect()
    }

    async fn delete(&self, id: SkillId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete skill", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SkillNotFound,
                format!("Skill not found: {}", id),
            ));
        }
        Ok(())
    }
}
