use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{AccountId, CommentId, PostId};

/// Threaded comment on a post. `parent_id = NULL` marks a root comment.
///
/// The tree lives in the database as parent pointers; it is materialized on
/// demand with a depth-bounded query, never held as an in-memory cyclic
/// graph.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub author_id: AccountId,
    pub content: String,

    pub is_active: bool,
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Comment row plus its depth in the thread (root = 1), as returned by the
/// bounded recursive traversal.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct CommentWithDepth {
    pub id: CommentId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub author_id: AccountId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub depth: i32,
}

impl Comment {
    /// Find comment by ID, excluding deleted/inactive rows.
    pub async fn find_by_id(id: CommentId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM comments
             WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Is this comment an active, undeleted comment on the given post?
    pub async fn exists_active_on_post(
        id: CommentId,
        post_id: PostId,
        conn: &mut PgConnection,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM comments
                WHERE id = $1 AND post_id = $2
                  AND is_deleted = FALSE AND is_active = TRUE
            )",
        )
        .bind(id)
        .bind(post_id)
        .fetch_one(conn)
        .await
    }

    /// Insert a comment inside the caller's transaction.
    pub async fn insert(
        post_id: PostId,
        parent_id: Option<CommentId>,
        author_id: AccountId,
        content: &str,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO comments (post_id, parent_id, author_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(post_id)
        .bind(parent_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(conn)
        .await
    }

    /// Fetch a post's comment thread up to `max_depth` levels (root = 1),
    /// oldest first within each level. Deleted/inactive comments and their
    /// subtrees are excluded.
    pub async fn find_thread(
        post_id: PostId,
        max_depth: i32,
        pool: &PgPool,
    ) -> Result<Vec<CommentWithDepth>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithDepth>(
            "WITH RECURSIVE thread AS (
                SELECT c.id, c.post_id, c.parent_id, c.author_id, c.content,
                       c.created_at, 1 AS depth
                FROM comments c
                WHERE c.post_id = $1 AND c.parent_id IS NULL
                  AND c.is_deleted = FALSE AND c.is_active = TRUE
                UNION ALL
                SELECT c.id, c.post_id, c.parent_id, c.author_id, c.content,
                       c.created_at, t.depth + 1
                FROM comments c
                JOIN thread t ON c.parent_id = t.id
                WHERE t.depth < $2
                  AND c.is_deleted = FALSE AND c.is_active = TRUE
             )
             SELECT * FROM thread
             ORDER BY depth ASC, created_at ASC, id ASC",
        )
        .bind(post_id)
        .bind(max_depth)
        .fetch_all(pool)
        .await
    }
}
