//! Comment actions
//!
//! Threaded comments live as parent pointers; trees are materialized on
//! demand with a depth-bounded recursive query.

use tracing::info;

use crate::common::{AccountId, CommentId, EngineError, EngineResult, PostId};
use crate::domains::accounts::models::Account;
use crate::domains::posts::data::CommentNode;
use crate::domains::posts::models::{Comment, Post};
use crate::kernel::EngineDeps;

/// Deepest thread level `get_comment_tree` will materialize.
pub const MAX_COMMENT_DEPTH: i32 = 32;

/// Add a comment (root when `parent_id` is `None`) and bump the post's
/// `comment_count` in the same transaction.
///
/// # Errors
///
/// - `Validation` on empty content
/// - `NotFound` when the post, author, or referenced parent comment is
///   missing, inactive, or deleted, or the parent belongs to another post
pub async fn add_comment(
    post_id: PostId,
    author_id: AccountId,
    parent_id: Option<CommentId>,
    content: &str,
    deps: &EngineDeps,
) -> EngineResult<Comment> {
    if content.trim().is_empty() {
        return Err(EngineError::validation("comment content must not be empty"));
    }

    let mut tx = deps.db_pool.begin().await?;

    if !Post::exists_active(post_id, &mut *tx).await? {
        return Err(EngineError::NotFound("post"));
    }
    if !Account::exists_active(author_id, &mut *tx).await? {
        return Err(EngineError::NotFound("author account"));
    }
    if let Some(parent) = parent_id {
        if !Comment::exists_active_on_post(parent, post_id, &mut *tx).await? {
            return Err(EngineError::NotFound("parent comment"));
        }
    }

    let comment = Comment::insert(post_id, parent_id, author_id, content, &mut *tx).await?;
    Post::increment_comment_count(post_id, &mut *tx).await?;
    tx.commit().await?;

    info!(comment_id = %comment.id, post_id = %post_id, "Comment added");
    Ok(comment)
}

/// Materialize a post's comment thread down to `max_depth` levels (root = 1).
///
/// # Errors
///
/// - `Validation` when `max_depth` is outside `[1, MAX_COMMENT_DEPTH]`
/// - `NotFound` when the post is missing, inactive, or deleted
pub async fn get_comment_tree(
    post_id: PostId,
    max_depth: i32,
    deps: &EngineDeps,
) -> EngineResult<Vec<CommentNode>> {
    if !(1..=MAX_COMMENT_DEPTH).contains(&max_depth) {
        return Err(EngineError::validation(format!(
            "max_depth must be between 1 and {}, got {}",
            MAX_COMMENT_DEPTH, max_depth
        )));
    }

    if Post::find_by_id(post_id, &deps.db_pool).await?.is_none() {
        return Err(EngineError::NotFound("post"));
    }

    let rows = Comment::find_thread(post_id, max_depth, &deps.db_pool).await?;
    Ok(CommentNode::build_tree(rows))
}
