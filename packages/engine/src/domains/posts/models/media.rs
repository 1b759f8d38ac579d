use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{MediaId, PostId};

/// Media kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(anyhow::anyhow!("Invalid media kind: {}", s)),
        }
    }
}

/// Ordered media attachment on a post. `display_order` is unique per post,
/// ascending.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub post_id: PostId,
    pub url: String,
    pub kind: MediaKind,
    pub display_order: i32,
}

/// Input for one media attachment of a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInput {
    pub url: String,
    pub kind: MediaKind,
    pub display_order: i32,
}

impl Media {
    /// Insert all media rows for a new post inside the caller's transaction.
    pub async fn insert_all(
        post_id: PostId,
        media: &[MediaInput],
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        for item in media {
            sqlx::query(
                "INSERT INTO post_media (post_id, url, kind, display_order)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(post_id)
            .bind(&item.url)
            .bind(item.kind)
            .bind(item.display_order)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// All media for a post, in display order.
    pub async fn find_by_post(post_id: PostId, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM post_media WHERE post_id = $1 ORDER BY display_order ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_media_kind_roundtrip() {
        for kind in [MediaKind::Image, MediaKind::Video] {
            assert_eq!(MediaKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert!(MediaKind::from_str("gif").is_err());
    }
}
