use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{LanguageId, PostId};

/// Translated text variant of a post's description for one language.
/// Keyed by `(post_id, language_id)`.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Localization {
    pub post_id: PostId,
    pub language_id: LanguageId,
    pub text: String,
    pub is_active: bool,
    pub is_deleted: bool,
}

/// Input for one localization of a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationInput {
    pub language_id: LanguageId,
    pub text: String,
}

/// Localization joined with language metadata, for hydrated post views.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedText {
    pub language_id: LanguageId,
    pub language_code: String,
    pub language_name: String,
    pub text: String,
}

impl Localization {
    /// Insert all localization rows for a new post inside the caller's
    /// transaction.
    pub async fn insert_all(
        post_id: PostId,
        localizations: &[LocalizationInput],
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        for item in localizations {
            sqlx::query(
                "INSERT INTO post_localizations (post_id, language_id, text)
                 VALUES ($1, $2, $3)",
            )
            .bind(post_id)
            .bind(item.language_id)
            .bind(&item.text)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Active localizations of a post joined with language metadata.
    pub async fn find_by_post(
        post_id: PostId,
        pool: &PgPool,
    ) -> Result<Vec<LocalizedText>, sqlx::Error> {
        sqlx::query_as::<_, LocalizedText>(
            "SELECT pl.language_id, l.code AS language_code, l.name AS language_name, pl.text
             FROM post_localizations pl
             JOIN languages l ON l.id = pl.language_id
             WHERE pl.post_id = $1
               AND pl.is_deleted = FALSE AND pl.is_active = TRUE
               AND l.is_deleted = FALSE AND l.is_active = TRUE
             ORDER BY pl.language_id ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    /// Resolve a post's description in the requested language.
    ///
    /// Returns the unique active, non-deleted localization text when present,
    /// otherwise falls back to the base description. The `(post_id,
    /// language_id)` key is unique by construction; the `ORDER BY ... LIMIT 1`
    /// keeps resolution deterministic even if a defect ever produces
    /// duplicates.
    pub async fn resolve_description(
        post_id: PostId,
        base_description: &str,
        language_id: LanguageId,
        pool: &PgPool,
    ) -> Result<String, sqlx::Error> {
        let localized = sqlx::query_scalar::<_, String>(
            "SELECT text FROM post_localizations
             WHERE post_id = $1 AND language_id = $2
               AND is_deleted = FALSE AND is_active = TRUE
             ORDER BY language_id ASC
             LIMIT 1",
        )
        .bind(post_id)
        .bind(language_id)
        .fetch_optional(pool)
        .await?;

        Ok(localized.unwrap_or_else(|| base_description.to_string()))
    }
}
