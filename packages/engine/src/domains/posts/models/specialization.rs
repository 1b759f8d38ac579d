use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::PostId;

/// Publication kind of a post.
///
/// Kinds are discriminated by which side table has a row for the post id -
/// never more than one, never zero, once created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    /// Long-form article, no extra fields.
    Article,
    /// Ephemeral short video with a fixed 24h expiration.
    Reel,
    /// Standard feed post, no extra fields.
    Normal,
}

impl PostKind {
    /// Side table holding this kind's specialization rows.
    pub fn side_table(&self) -> &'static str {
        match self {
            PostKind::Article => "articles",
            PostKind::Reel => "reels",
            PostKind::Normal => "normal_posts",
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostKind::Article => write!(f, "article"),
            PostKind::Reel => write!(f, "reel"),
            PostKind::Normal => write!(f, "normal"),
        }
    }
}

impl std::str::FromStr for PostKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "article" => Ok(PostKind::Article),
            "reel" => Ok(PostKind::Reel),
            "normal" => Ok(PostKind::Normal),
            _ => Err(anyhow::anyhow!("Invalid post kind: {}", s)),
        }
    }
}

/// The kind-specific side record extending a base post's identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Specialization {
    Article,
    Reel {
        /// Post creation time + 24h, set once at creation, immutable.
        expiration_date: DateTime<Utc>,
    },
    Normal,
}

impl Specialization {
    pub fn kind(&self) -> PostKind {
        match self {
            Specialization::Article => PostKind::Article,
            Specialization::Reel { .. } => PostKind::Reel,
            Specialization::Normal => PostKind::Normal,
        }
    }

    /// Insert the side row for a freshly created post, inside the same
    /// transaction that inserted the base row.
    ///
    /// Reels compute `expiration_date` in SQL from the base row's
    /// `created_at`, so it is exactly creation time + 24h.
    pub async fn insert_for(
        kind: PostKind,
        post_id: PostId,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        match kind {
            PostKind::Article => {
                sqlx::query("INSERT INTO articles (post_id) VALUES ($1)")
                    .bind(post_id)
                    .execute(conn)
                    .await?;
                Ok(Specialization::Article)
            }
            PostKind::Normal => {
                sqlx::query("INSERT INTO normal_posts (post_id) VALUES ($1)")
                    .bind(post_id)
                    .execute(conn)
                    .await?;
                Ok(Specialization::Normal)
            }
            PostKind::Reel => {
                let expiration_date = sqlx::query_scalar::<_, DateTime<Utc>>(
                    "INSERT INTO reels (post_id, expiration_date)
                     SELECT id, created_at + INTERVAL '24 hours' FROM posts WHERE id = $1
                     RETURNING expiration_date",
                )
                .bind(post_id)
                .fetch_one(conn)
                .await?;
                Ok(Specialization::Reel { expiration_date })
            }
        }
    }

    /// Resolve which side table owns this post id.
    pub async fn find_for_post(
        post_id: PostId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        if let Some(expiration_date) = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT expiration_date FROM reels WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_optional(pool)
        .await?
        {
            return Ok(Some(Specialization::Reel { expiration_date }));
        }

        let is_article = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM articles WHERE post_id = $1)",
        )
        .bind(post_id)
        .fetch_one(pool)
        .await?;
        if is_article {
            return Ok(Some(Specialization::Article));
        }

        let is_normal = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM normal_posts WHERE post_id = $1)",
        )
        .bind(post_id)
        .fetch_one(pool)
        .await?;
        if is_normal {
            return Ok(Some(Specialization::Normal));
        }

        Ok(None)
    }
}
