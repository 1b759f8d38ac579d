use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{AccountId, LanguageId, PostId, PostTypeId};
use crate::domains::posts::models::{LocalizedText, Media, MediaKind, Post, Specialization};

/// API representation of one media attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaData {
    pub url: String,
    pub kind: MediaKind,
    pub display_order: i32,
}

impl From<Media> for MediaData {
    fn from(media: Media) -> Self {
        Self {
            url: media.url,
            kind: media.kind,
            display_order: media.display_order,
        }
    }
}

/// Hydrated post view: base record plus its specialization, media ordered by
/// `display_order`, and localizations joined with language metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostData {
    pub id: PostId,
    pub author_id: AccountId,
    pub description: String,
    pub post_type_id: PostTypeId,
    pub specialization: Specialization,

    pub reaction_count: i64,
    pub comment_count: i64,

    pub is_active: bool,
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub media: Vec<MediaData>,
    pub localizations: Vec<LocalizedText>,
}

impl PostData {
    pub fn from_parts(
        post: Post,
        specialization: Specialization,
        media: Vec<Media>,
        localizations: Vec<LocalizedText>,
    ) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            description: post.description,
            post_type_id: post.post_type_id,
            specialization,
            reaction_count: post.reaction_count,
            comment_count: post.comment_count,
            is_active: post.is_active,
            is_deleted: post.is_deleted,
            created_at: post.created_at,
            updated_at: post.updated_at,
            media: media.into_iter().map(MediaData::from).collect(),
            localizations,
        }
    }

    /// Description in the requested language, falling back to the base
    /// description when no localization is hydrated for it.
    pub fn description_in(&self, language_id: LanguageId) -> &str {
        self.localizations
            .iter()
            .find(|l| l.language_id == language_id)
            .map(|l| l.text.as_str())
            .unwrap_or(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Id;

    fn sample() -> PostData {
        PostData {
            id: Id::from_i64(1),
            author_id: Id::from_i64(7),
            description: "base text".to_string(),
            post_type_id: Id::from_i64(1),
            specialization: Specialization::Normal,
            reaction_count: 0,
            comment_count: 0,
            is_active: true,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            media: vec![],
            localizations: vec![LocalizedText {
                language_id: Id::from_i64(2),
                language_code: "es".to_string(),
                language_name: "Spanish".to_string(),
                text: "texto base".to_string(),
            }],
        }
    }

    #[test]
    fn test_description_in_prefers_localization() {
        let post = sample();
        assert_eq!(post.description_in(Id::from_i64(2)), "texto base");
    }

    #[test]
    fn test_description_in_falls_back_to_base() {
        let post = sample();
        assert_eq!(post.description_in(Id::from_i64(3)), "base text");
    }
}
