//! Post query engine
//!
//! Filtered, sorted, paginated views over posts. The soft-delete/active
//! predicate is injected here once for every listing path: deleted rows are
//! excluded regardless of the active flag unless `include_deleted` is set.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use tracing::info;

use crate::common::{
    AccountId, EngineError, EngineResult, LanguageId, PageArgs, Paginated, PostId, PostTypeId,
};
use crate::domains::posts::data::PostData;
use crate::domains::posts::models::{Localization, Media, Post, PostKind, Specialization};
use crate::kernel::EngineDeps;

/// Optional, AND-combined filters for post listings.
#[derive(Debug, Clone, Default)]
pub struct PostFilters {
    pub author_id: Option<AccountId>,
    /// Single id or a set; any match passes.
    pub post_type_ids: Option<Vec<PostTypeId>>,
    /// Existence-of-side-row predicate.
    pub kind: Option<PostKind>,
    /// `None` applies the default active-only predicate; `Some(false)`
    /// explicitly selects inactive rows.
    pub is_active: Option<bool>,
    /// Deleted rows are excluded unless this is set. Deletion wins over the
    /// active flag either way.
    pub include_deleted: bool,
    pub description_contains: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub min_reaction_count: Option<i64>,
    pub max_reaction_count: Option<i64>,
}

/// Sort key for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortKey {
    CreatedAt,
    UpdatedAt,
    ReactionCount,
}

impl PostSortKey {
    fn column(&self) -> &'static str {
        match self {
            PostSortKey::CreatedAt => "created_at",
            PostSortKey::UpdatedAt => "updated_at",
            PostSortKey::ReactionCount => "reaction_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort specification; defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSort {
    pub key: PostSortKey,
    pub direction: SortDirection,
}

impl Default for PostSort {
    fn default() -> Self {
        PostSort {
            key: PostSortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// Append the filter predicates to a query ending in `... FROM posts p`.
fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filters: &'a PostFilters) {
    qb.push(" WHERE 1=1");

    if !filters.include_deleted {
        qb.push(" AND p.is_deleted = FALSE");
    }
    match filters.is_active {
        None => {
            qb.push(" AND p.is_active = TRUE");
        }
        Some(flag) => {
            qb.push(" AND p.is_active = ");
            qb.push_bind(flag);
        }
    }
    if let Some(author_id) = filters.author_id {
        qb.push(" AND p.author_id = ");
        qb.push_bind(author_id);
    }
    if let Some(ref type_ids) = filters.post_type_ids {
        qb.push(" AND p.post_type_id = ANY(");
        qb.push_bind(type_ids.as_slice());
        qb.push(")");
    }
    if let Some(kind) = filters.kind {
        // side tables are a fixed set, never user input
        qb.push(" AND EXISTS (SELECT 1 FROM ");
        qb.push(kind.side_table());
        qb.push(" s WHERE s.post_id = p.id)");
    }
    if let Some(ref needle) = filters.description_contains {
        qb.push(" AND p.description ILIKE ");
        qb.push_bind(format!("%{}%", needle));
    }
    if let Some(created_after) = filters.created_after {
        qb.push(" AND p.created_at >= ");
        qb.push_bind(created_after);
    }
    if let Some(created_before) = filters.created_before {
        qb.push(" AND p.created_at <= ");
        qb.push_bind(created_before);
    }
    if let Some(min_reactions) = filters.min_reaction_count {
        qb.push(" AND p.reaction_count >= ");
        qb.push_bind(min_reactions);
    }
    if let Some(max_reactions) = filters.max_reaction_count {
        qb.push(" AND p.reaction_count <= ");
        qb.push_bind(max_reactions);
    }
}

/// Get one page of posts with cursor-free offset pagination.
///
/// The total count runs against the fully filtered set before skip/take, so
/// `has_next_page`/`has_previous_page` reflect the true total. Page bounds
/// are validated before any data access.
pub async fn get_posts_paginated(
    filters: &PostFilters,
    sort: PostSort,
    page: PageArgs,
    deps: &EngineDeps,
) -> EngineResult<Paginated<PostData>> {
    let args = page.validate()?;
    let pool = &deps.db_pool;

    let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
    push_filters(&mut count_qb, filters);
    let total_count: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<Postgres>::new("SELECT p.* FROM posts p");
    push_filters(&mut qb, filters);
    qb.push(" ORDER BY p.");
    qb.push(sort.key.column());
    qb.push(match sort.direction {
        SortDirection::Asc => " ASC",
        SortDirection::Desc => " DESC",
    });
    // secondary key keeps pages stable when the sort key ties
    qb.push(", p.id DESC");
    qb.push(" LIMIT ");
    qb.push_bind(args.limit());
    qb.push(" OFFSET ");
    qb.push_bind(args.offset());

    let posts: Vec<Post> = qb.build_query_as().fetch_all(pool).await?;

    let mut items = Vec::with_capacity(posts.len());
    for post in posts {
        items.push(hydrate(post, deps).await?);
    }

    info!(
        total_count,
        page = args.page(),
        page_size = args.page_size(),
        "Posts listed"
    );
    Ok(Paginated::new(items, total_count, &args))
}

/// Convenience listing for reels (existence of a reel side row).
pub async fn get_reels_paginated(
    page: PageArgs,
    deps: &EngineDeps,
) -> EngineResult<Paginated<PostData>> {
    let filters = PostFilters {
        kind: Some(PostKind::Reel),
        ..Default::default()
    };
    get_posts_paginated(&filters, PostSort::default(), page, deps).await
}

/// Fetch one post as a hydrated view.
///
/// The default read path excludes deleted/inactive posts; pass
/// `include_deleted` to retrieve a soft-deleted one.
pub async fn get_post_by_id(
    post_id: PostId,
    include_deleted: bool,
    deps: &EngineDeps,
) -> EngineResult<PostData> {
    let post = if include_deleted {
        Post::find_by_id_include_deleted(post_id, &deps.db_pool).await?
    } else {
        Post::find_by_id(post_id, &deps.db_pool).await?
    };

    let Some(post) = post else {
        return Err(EngineError::NotFound("post"));
    };
    hydrate(post, deps).await
}

/// Resolve a post's description in the requested language, falling back to
/// the base description when no active localization exists.
pub async fn get_post_description(
    post_id: PostId,
    language_id: LanguageId,
    deps: &EngineDeps,
) -> EngineResult<String> {
    let Some(post) = Post::find_by_id(post_id, &deps.db_pool).await? else {
        return Err(EngineError::NotFound("post"));
    };
    let text =
        Localization::resolve_description(post.id, &post.description, language_id, &deps.db_pool)
            .await?;
    Ok(text)
}

/// Assemble the materialized view for one post.
async fn hydrate(post: Post, deps: &EngineDeps) -> EngineResult<PostData> {
    let pool = &deps.db_pool;
    let specialization = Specialization::find_for_post(post.id, pool)
        .await?
        .ok_or_else(|| {
            EngineError::Internal(anyhow::anyhow!(
                "post {} has no specialization row",
                post.id
            ))
        })?;
    let media = Media::find_by_post(post.id, pool).await?;
    let localizations = Localization::find_by_post(post.id, pool).await?;
    Ok(PostData::from_parts(post, specialization, media, localizations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Id;

    #[test]
    fn test_default_filters_exclude_deleted_and_inactive() {
        let filters = PostFilters::default();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT p.* FROM posts p");
        push_filters(&mut qb, &filters);
        let sql = qb.sql();
        assert!(sql.contains("p.is_deleted = FALSE"));
        assert!(sql.contains("p.is_active = TRUE"));
    }

    #[test]
    fn test_include_deleted_lifts_only_the_deleted_check() {
        let filters = PostFilters {
            include_deleted: true,
            ..Default::default()
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT p.* FROM posts p");
        push_filters(&mut qb, &filters);
        let sql = qb.sql();
        assert!(!sql.contains("is_deleted"));
        assert!(sql.contains("p.is_active = TRUE"));
    }

    #[test]
    fn test_kind_filter_uses_side_table_existence() {
        let filters = PostFilters {
            kind: Some(PostKind::Reel),
            ..Default::default()
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
        push_filters(&mut qb, &filters);
        assert!(qb.sql().contains("EXISTS (SELECT 1 FROM reels"));
    }

    #[test]
    fn test_range_filters_bind_both_ends() {
        let filters = PostFilters {
            author_id: Some(Id::from_i64(7)),
            min_reaction_count: Some(1),
            max_reaction_count: Some(10),
            ..Default::default()
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT p.* FROM posts p");
        push_filters(&mut qb, &filters);
        let sql = qb.sql();
        assert!(sql.contains("p.author_id = "));
        assert!(sql.contains("p.reaction_count >= "));
        assert!(sql.contains("p.reaction_count <= "));
    }

    #[test]
    fn test_default_sort_is_created_at_desc() {
        let sort = PostSort::default();
        assert_eq!(sort.key, PostSortKey::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
    }
}
