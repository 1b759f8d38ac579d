use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::AccountId;

/// Lifecycle status of a follow edge. Removal flips the status instead of
/// deleting the row, so the relationship history is retained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum FollowStatus {
    Active,
    Removed,
}

impl std::fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FollowStatus::Active => write!(f, "active"),
            FollowStatus::Removed => write!(f, "removed"),
        }
    }
}

/// Follow edge - directed "follower observes following's content".
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: AccountId,
    pub following_id: AccountId,
    pub status: FollowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Follow {
    /// Find the follow edge for a pair, regardless of status.
    pub async fn find(
        follower_id: AccountId,
        following_id: AccountId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM follows WHERE follower_id = $1 AND following_id = $2",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(pool)
        .await
    }

    /// Lock and fetch the edge inside the caller's transaction so concurrent
    /// follow/unfollow calls on the same pair serialize.
    pub async fn find_for_update(
        follower_id: AccountId,
        following_id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM follows
             WHERE follower_id = $1 AND following_id = $2
             FOR UPDATE",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(conn)
        .await
    }

    /// Insert a new active edge.
    ///
    /// `FOR UPDATE` locks nothing when the pair has no row yet, so two first
    /// follows can race to this insert. The loser's `ON CONFLICT DO NOTHING`
    /// yields no row; returns `None` so the caller can report the conflict
    /// instead of surfacing a unique violation.
    pub async fn insert_active(
        follower_id: AccountId,
        following_id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO follows (follower_id, following_id, status)
             VALUES ($1, $2, 'active')
             ON CONFLICT (follower_id, following_id) DO NOTHING
             RETURNING *",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(conn)
        .await
    }

    /// Flip the edge's status (reactivation or removal).
    pub async fn set_status(
        follower_id: AccountId,
        following_id: AccountId,
        status: FollowStatus,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE follows
             SET status = $3, updated_at = NOW()
             WHERE follower_id = $1 AND following_id = $2
             RETURNING *",
        )
        .bind(follower_id)
        .bind(following_id)
        .bind(status)
        .fetch_one(conn)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(FollowStatus::Active.to_string(), "active");
        assert_eq!(FollowStatus::Removed.to_string(), "removed");
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&FollowStatus::Removed).unwrap();
        assert_eq!(json, "\"removed\"");
        let parsed: FollowStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(parsed, FollowStatus::Active);
    }
}
