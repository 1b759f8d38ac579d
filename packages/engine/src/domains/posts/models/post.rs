use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{AccountId, PostId, PostTypeId};

/// Base post - the common record shared by every publication kind.
///
/// Soft delete only: `is_deleted` + `deleted_at`, rows are never removed.
/// A deleted post is excluded from every default read path regardless of
/// `is_active`.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: AccountId,
    pub description: String,
    pub post_type_id: PostTypeId,

    pub reaction_count: i64,
    pub comment_count: i64,

    pub is_active: bool,
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Find post by ID, excluding deleted/inactive rows.
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM posts
             WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find post by ID including soft-deleted and inactive rows.
    pub async fn find_by_id_include_deleted(
        id: PostId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active post inside the caller's transaction.
    pub async fn find_active(
        id: PostId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM posts
             WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Does this post exist, undeleted and active?
    pub async fn exists_active(id: PostId, conn: &mut PgConnection) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM posts
                WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE
            )",
        )
        .bind(id)
        .fetch_one(conn)
        .await
    }

    /// Insert the base post row inside the caller's transaction.
    pub async fn insert(
        author_id: AccountId,
        description: &str,
        post_type_id: PostTypeId,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO posts (author_id, description, post_type_id)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(author_id)
        .bind(description)
        .bind(post_type_id)
        .fetch_one(conn)
        .await
    }

    /// Soft delete an active post inside the caller's transaction.
    ///
    /// Returns `None` when the post is missing, inactive, or already
    /// deleted - the row is never resurrected or double-deleted.
    pub async fn soft_delete(
        id: PostId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE posts
             SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Atomically bump `reaction_count` inside the caller's transaction.
    ///
    /// Server-side arithmetic, never read-modify-write in application code,
    /// so concurrent reactions cannot lose updates.
    pub async fn increment_reaction_count(
        id: PostId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE posts SET reaction_count = reaction_count + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Atomically lower `reaction_count`, clamped at 0.
    pub async fn decrement_reaction_count(
        id: PostId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE posts
             SET reaction_count = GREATEST(reaction_count - 1, 0), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Atomically bump `comment_count` inside the caller's transaction.
    pub async fn increment_comment_count(
        id: PostId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE posts SET comment_count = comment_count + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
