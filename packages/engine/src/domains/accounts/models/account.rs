use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::AccountId;

/// Account model - SQL persistence layer
///
/// Counters (`followers_count`, `following_count`, `received_reactions_count`,
/// `post_count`) are derived values maintained exclusively by the follow,
/// reaction, and post managers through atomic server-side updates. They are
/// never recomputed by scanning during normal operation.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub display_name: String,

    pub followers_count: i64,
    pub following_count: i64,
    pub received_reactions_count: i64,
    pub post_count: i64,

    pub is_active: bool,
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Find account by ID
    pub async fn find_by_id(id: AccountId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Collaborator lookup: does this account exist, undeleted and active?
    pub async fn exists_active(
        id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM accounts
                WHERE id = $1 AND is_deleted = FALSE AND is_active = TRUE
            )",
        )
        .bind(id)
        .fetch_one(conn)
        .await
    }

    /// Insert a new account (returns inserted record with defaults applied)
    pub async fn create(display_name: &str, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO accounts (display_name) VALUES ($1) RETURNING *",
        )
        .bind(display_name)
        .fetch_one(pool)
        .await
    }

    /// Atomically bump `post_count` inside the caller's transaction.
    pub async fn increment_post_count(
        id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET post_count = post_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Atomically lower `post_count`, floored at 0.
    pub async fn decrement_post_count(
        id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts
             SET post_count = GREATEST(post_count - 1, 0), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Atomically bump the author's `received_reactions_count`.
    pub async fn increment_received_reactions(
        id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts
             SET received_reactions_count = received_reactions_count + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Atomically lower the author's `received_reactions_count`, floored at 0.
    pub async fn decrement_received_reactions(
        id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts
             SET received_reactions_count = GREATEST(received_reactions_count - 1, 0),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Apply the symmetric counter bump for a new active follow.
    pub async fn apply_follow_counters(
        follower_id: AccountId,
        following_id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET following_count = following_count + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(follower_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "UPDATE accounts SET followers_count = followers_count + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(following_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Reverse the symmetric counter bump when a follow is removed, floored at 0.
    pub async fn remove_follow_counters(
        follower_id: AccountId,
        following_id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts
             SET following_count = GREATEST(following_count - 1, 0), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(follower_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "UPDATE accounts
             SET followers_count = GREATEST(followers_count - 1, 0), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(following_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
