//! Post creation action
//!
//! Centralized logic for creating posts with all associated data (media,
//! localizations, and the kind-specific specialization row). The whole batch
//! is validated before any write; the base row, its children, and exactly one
//! side row commit as one atomic unit, so partial creation is never
//! observable.

use std::collections::HashSet;

use tracing::info;
use typed_builder::TypedBuilder;

use crate::common::{AccountId, EngineError, EngineResult, PostTypeId};
use crate::domains::accounts::models::Account;
use crate::domains::catalog::models::{Language, PostType};
use crate::domains::posts::data::PostData;
use crate::domains::posts::models::{
    Localization, LocalizationInput, Media, MediaInput, Post, PostKind, Specialization,
};
use crate::kernel::EngineDeps;

/// Input for creating a post of any kind.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CreatePost {
    pub author_id: AccountId,
    #[builder(setter(into))]
    pub description: String,
    pub post_type_id: PostTypeId,
    #[builder(default)]
    pub media: Vec<MediaInput>,
    #[builder(default)]
    pub localizations: Vec<LocalizationInput>,
}

/// Create a long-form article.
pub async fn create_article(input: CreatePost, deps: &EngineDeps) -> EngineResult<PostData> {
    create_post(PostKind::Article, input, deps).await
}

/// Create an ephemeral reel (expires 24h after creation).
pub async fn create_reel(input: CreatePost, deps: &EngineDeps) -> EngineResult<PostData> {
    create_post(PostKind::Reel, input, deps).await
}

/// Create a standard feed post.
pub async fn create_normal_post(input: CreatePost, deps: &EngineDeps) -> EngineResult<PostData> {
    create_post(PostKind::Normal, input, deps).await
}

/// Create a post of the given kind with all associated records.
///
/// Validates the author, post type, and every referenced language before any
/// write; a single invalid reference rejects the entire batch. On success
/// returns the hydrated view (media in display order, localizations joined
/// with language metadata).
pub async fn create_post(
    kind: PostKind,
    input: CreatePost,
    deps: &EngineDeps,
) -> EngineResult<PostData> {
    validate_input(&input)?;

    let mut tx = deps.db_pool.begin().await?;

    if !Account::exists_active(input.author_id, &mut *tx).await? {
        return Err(EngineError::NotFound("author account"));
    }
    if !PostType::exists_active(input.post_type_id, &mut *tx).await? {
        return Err(EngineError::NotFound("post type"));
    }
    for localization in &input.localizations {
        if !Language::exists_active(localization.language_id, &mut *tx).await? {
            return Err(EngineError::NotFound("language"));
        }
    }

    let post = Post::insert(
        input.author_id,
        &input.description,
        input.post_type_id,
        &mut *tx,
    )
    .await?;
    Media::insert_all(post.id, &input.media, &mut *tx).await?;
    Localization::insert_all(post.id, &input.localizations, &mut *tx).await?;
    let specialization = Specialization::insert_for(kind, post.id, &mut *tx).await?;
    Account::increment_post_count(input.author_id, &mut *tx).await?;

    tx.commit().await?;

    info!(post_id = %post.id, author_id = %post.author_id, kind = %kind, "Post created");

    let media = Media::find_by_post(post.id, &deps.db_pool).await?;
    let localizations = Localization::find_by_post(post.id, &deps.db_pool).await?;
    Ok(PostData::from_parts(post, specialization, media, localizations))
}

/// Structural checks that need no data access.
fn validate_input(input: &CreatePost) -> EngineResult<()> {
    if input.description.trim().is_empty() {
        return Err(EngineError::validation("description must not be empty"));
    }

    let mut orders = HashSet::new();
    for media in &input.media {
        if media.display_order < 0 {
            return Err(EngineError::validation("display_order must be >= 0"));
        }
        if !orders.insert(media.display_order) {
            return Err(EngineError::validation(format!(
                "duplicate media display_order {}",
                media.display_order
            )));
        }
    }

    let mut languages = HashSet::new();
    for localization in &input.localizations {
        if !languages.insert(localization.language_id) {
            return Err(EngineError::validation(format!(
                "duplicate localization for language {}",
                localization.language_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Id;
    use crate::domains::posts::models::MediaKind;

    fn base_input() -> CreatePost {
        CreatePost::builder()
            .author_id(Id::from_i64(7))
            .description("hello")
            .post_type_id(Id::from_i64(1))
            .build()
    }

    #[test]
    fn test_validate_rejects_empty_description() {
        let mut input = base_input();
        input.description = "   ".to_string();
        assert!(matches!(
            validate_input(&input),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_display_order() {
        let mut input = base_input();
        input.media = vec![
            MediaInput {
                url: "https://cdn.example/a.jpg".to_string(),
                kind: MediaKind::Image,
                display_order: 0,
            },
            MediaInput {
                url: "https://cdn.example/b.jpg".to_string(),
                kind: MediaKind::Image,
                display_order: 0,
            },
        ];
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_language() {
        let mut input = base_input();
        input.localizations = vec![
            LocalizationInput {
                language_id: Id::from_i64(2),
                text: "hola".to_string(),
            },
            LocalizationInput {
                language_id: Id::from_i64(2),
                text: "hola otra vez".to_string(),
            },
        ];
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn test_validate_accepts_ordered_media() {
        let mut input = base_input();
        input.media = vec![
            MediaInput {
                url: "https://cdn.example/a.jpg".to_string(),
                kind: MediaKind::Image,
                display_order: 0,
            },
            MediaInput {
                url: "https://cdn.example/b.mp4".to_string(),
                kind: MediaKind::Video,
                display_order: 1,
            },
        ];
        assert!(validate_input(&input).is_ok());
    }
}
