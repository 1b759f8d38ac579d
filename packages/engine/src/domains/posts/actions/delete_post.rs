//! Post deletion action
//!
//! Soft delete only: the row is flagged and timestamped, never removed, and
//! the author's `post_count` drops in the same transaction.

use tracing::info;

use crate::common::{EngineError, EngineResult, PostId};
use crate::domains::accounts::models::Account;
use crate::domains::posts::models::Post;
use crate::kernel::EngineDeps;

/// Soft-delete a post and decrement the author's `post_count` (floored at 0).
///
/// # Errors
///
/// Returns `NotFound` when the post is missing, inactive, or already deleted.
pub async fn delete_post(post_id: PostId, deps: &EngineDeps) -> EngineResult<Post> {
    let mut tx = deps.db_pool.begin().await?;

    let Some(post) = Post::soft_delete(post_id, &mut *tx).await? else {
        return Err(EngineError::NotFound("post"));
    };
    Account::decrement_post_count(post.author_id, &mut *tx).await?;

    tx.commit().await?;

    info!(post_id = %post.id, author_id = %post.author_id, "Post soft-deleted");
    Ok(post)
}
