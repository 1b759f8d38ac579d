//! Reaction manager
//!
//! Idempotent like/unlike with atomic counter maintenance. Each pair
//! `(post, account)` moves through {NoReaction, Active, Removed}; the row
//! mutation and the counter updates commit in one transaction, and counters
//! only ever change through server-side arithmetic.

use tracing::info;

use crate::common::{AccountId, EngineError, EngineResult, PostId};
use crate::domains::accounts::models::Account;
use crate::domains::posts::models::{Post, Reaction, ReactionStatus};
use crate::kernel::EngineDeps;

/// Outcome of `add_like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// A new or reactivated like; `reaction_count` went up by 1.
    Added,
    /// The account already had an active like; nothing changed.
    AlreadyLiked,
}

/// Outcome of `remove_like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlikeOutcome {
    /// The active like was removed; `reaction_count` went down by 1.
    Removed,
    /// No active like existed; nothing changed.
    NotLiked,
}

/// Add (or reactivate) a like from `account_id` on `post_id`.
///
/// Duplicate likes are idempotent: an existing active reaction returns
/// `AlreadyLiked` and leaves the counter untouched.
///
/// # Errors
///
/// Returns `NotFound` when the account or post is missing, inactive, or
/// deleted.
pub async fn add_like(
    account_id: AccountId,
    post_id: PostId,
    deps: &EngineDeps,
) -> EngineResult<LikeOutcome> {
    let mut tx = deps.db_pool.begin().await?;

    if !Account::exists_active(account_id, &mut *tx).await? {
        return Err(EngineError::NotFound("account"));
    }
    let Some(post) = Post::find_active(post_id, &mut *tx).await? else {
        return Err(EngineError::NotFound("post"));
    };

    let existing = Reaction::find_for_update(post_id, account_id, &mut *tx).await?;
    match existing {
        Some(reaction) if reaction.status == ReactionStatus::Active => {
            // Idempotent: already liked, counter unchanged.
            return Ok(LikeOutcome::AlreadyLiked);
        }
        Some(_) => {
            Reaction::set_status(post_id, account_id, ReactionStatus::Active, &mut *tx).await?;
        }
        None => {
            // A concurrent first like may commit between our lock attempt and
            // this insert; the losing insert yields no row and the winner's
            // like already counted.
            if Reaction::insert_active(post_id, account_id, &mut *tx)
                .await?
                .is_none()
            {
                return Ok(LikeOutcome::AlreadyLiked);
            }
        }
    }

    Post::increment_reaction_count(post_id, &mut *tx).await?;
    Account::increment_received_reactions(post.author_id, &mut *tx).await?;
    tx.commit().await?;

    info!(account_id = %account_id, post_id = %post_id, "Like added");
    Ok(LikeOutcome::Added)
}

/// Remove the active like from `account_id` on `post_id`.
///
/// When no active like exists this is an idempotent no-op (`NotLiked`), not
/// an error. The counter decrement is clamped at 0.
///
/// # Errors
///
/// Returns `NotFound` when the post is missing, inactive, or deleted.
pub async fn remove_like(
    account_id: AccountId,
    post_id: PostId,
    deps: &EngineDeps,
) -> EngineResult<UnlikeOutcome> {
    let mut tx = deps.db_pool.begin().await?;

    let Some(post) = Post::find_active(post_id, &mut *tx).await? else {
        return Err(EngineError::NotFound("post"));
    };

    let existing = Reaction::find_for_update(post_id, account_id, &mut *tx).await?;
    match existing {
        Some(reaction) if reaction.status == ReactionStatus::Active => {}
        _ => return Ok(UnlikeOutcome::NotLiked),
    }

    Reaction::set_status(post_id, account_id, ReactionStatus::Removed, &mut *tx).await?;
    Post::decrement_reaction_count(post_id, &mut *tx).await?;
    Account::decrement_received_reactions(post.author_id, &mut *tx).await?;
    tx.commit().await?;

    info!(account_id = %account_id, post_id = %post_id, "Like removed");
    Ok(UnlikeOutcome::Removed)
}
