use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::PostTypeId;

/// Post type registry entry (external catalog collaborator).
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct PostType {
    pub id: PostTypeId,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl PostType {
    /// Find post type by ID
    pub async fn find_by_id(id: PostTypeId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM post_types WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Collaborator lookup: does this post type exist, undeleted and active?
    pub async fn exists_active(
        id: PostTypeId,
        conn: &mut PgConnection,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM post_types
                WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE
            )",
        )
        .bind(id)
        .fetch_one(conn)
        .await
    }

    /// Insert a new post type
    pub async fn create(name: &str, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>("INSERT INTO post_types (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
