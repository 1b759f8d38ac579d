use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{AccountId, PostId};

/// Lifecycle status of a reaction. History is retained: a removed like keeps
/// its row with status 'removed' and may be reactivated later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum ReactionStatus {
    Active,
    Removed,
}

impl std::fmt::Display for ReactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionStatus::Active => write!(f, "active"),
            ReactionStatus::Removed => write!(f, "removed"),
        }
    }
}

/// An account's "like" on a post. Keyed by `(post_id, account_id)`.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub post_id: PostId,
    pub account_id: AccountId,
    pub status: ReactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Find the reaction for a pair, regardless of status.
    pub async fn find(
        post_id: PostId,
        account_id: AccountId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM reactions WHERE post_id = $1 AND account_id = $2",
        )
        .bind(post_id)
        .bind(account_id)
        .fetch_optional(pool)
        .await
    }

    /// Lock and fetch the reaction inside the caller's transaction so
    /// concurrent like/unlike calls on the same pair serialize.
    pub async fn find_for_update(
        post_id: PostId,
        account_id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM reactions
             WHERE post_id = $1 AND account_id = $2
             FOR UPDATE",
        )
        .bind(post_id)
        .bind(account_id)
        .fetch_optional(conn)
        .await
    }

    /// Insert a new active reaction.
    ///
    /// `FOR UPDATE` locks nothing when the pair has no row yet, so two first
    /// likes can race to this insert. The loser's `ON CONFLICT DO NOTHING`
    /// yields no row; returns `None` so the caller can resolve the outcome
    /// instead of surfacing a unique violation.
    pub async fn insert_active(
        post_id: PostId,
        account_id: AccountId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO reactions (post_id, account_id, status)
             VALUES ($1, $2, 'active')
             ON CONFLICT (post_id, account_id) DO NOTHING
             RETURNING *",
        )
        .bind(post_id)
        .bind(account_id)
        .fetch_optional(conn)
        .await
    }

    /// Flip the reaction's status (reactivation or removal).
    pub async fn set_status(
        post_id: PostId,
        account_id: AccountId,
        status: ReactionStatus,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE reactions
             SET status = $3, updated_at = NOW()
             WHERE post_id = $1 AND account_id = $2
             RETURNING *",
        )
        .bind(post_id)
        .bind(account_id)
        .bind(status)
        .fetch_one(conn)
        .await
    }
}
