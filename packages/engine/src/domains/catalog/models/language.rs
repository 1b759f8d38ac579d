use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::LanguageId;

/// Language registry entry (external catalog collaborator).
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Language {
    /// Find language by ID
    pub async fn find_by_id(id: LanguageId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM languages WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Collaborator lookup: does this language exist, undeleted and active?
    pub async fn exists_active(
        id: LanguageId,
        conn: &mut PgConnection,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM languages
                WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE
            )",
        )
        .bind(id)
        .fetch_one(conn)
        .await
    }

    /// Insert a new language
    pub async fn create(code: &str, name: &str, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO languages (code, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(code)
        .bind(name)
        .fetch_one(pool)
        .await
    }
}
