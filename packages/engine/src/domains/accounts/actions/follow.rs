//! Follow graph manager
//!
//! Follow/unfollow with atomic symmetric counter maintenance. Unlike the
//! reaction manager, a duplicate active follow is a Conflict, not an
//! idempotent success; that asymmetry is deliberate product behavior.

use tracing::info;

use crate::common::{AccountId, EngineError, EngineResult};
use crate::domains::accounts::models::{Account, Follow, FollowStatus};
use crate::kernel::EngineDeps;

/// Create a directed follow edge from `follower_id` to `following_id`.
///
/// The edge insert (or reactivation) and both counter bumps commit in one
/// transaction.
///
/// # Errors
///
/// - `Validation` on self-follow
/// - `NotFound` when either account is missing, inactive, or deleted
/// - `Conflict` when an active edge already exists
pub async fn follow(
    follower_id: AccountId,
    following_id: AccountId,
    deps: &EngineDeps,
) -> EngineResult<Follow> {
    if follower_id == following_id {
        return Err(EngineError::validation("an account cannot follow itself"));
    }

    let mut tx = deps.db_pool.begin().await?;

    if !Account::exists_active(follower_id, &mut *tx).await? {
        return Err(EngineError::NotFound("follower account"));
    }
    if !Account::exists_active(following_id, &mut *tx).await? {
        return Err(EngineError::NotFound("account to follow"));
    }

    let existing = Follow::find_for_update(follower_id, following_id, &mut *tx).await?;

    let edge = match existing {
        Some(edge) if edge.status == FollowStatus::Active => {
            return Err(EngineError::Conflict("already following this account"));
        }
        Some(_) => {
            Follow::set_status(follower_id, following_id, FollowStatus::Active, &mut *tx).await?
        }
        // A concurrent first follow may commit between our lock attempt and
        // this insert; the losing insert yields no row and the edge already
        // exists.
        None => match Follow::insert_active(follower_id, following_id, &mut *tx).await? {
            Some(edge) => edge,
            None => return Err(EngineError::Conflict("already following this account")),
        },
    };

    Account::apply_follow_counters(follower_id, following_id, &mut *tx).await?;
    tx.commit().await?;

    info!(
        follower_id = %follower_id,
        following_id = %following_id,
        "Follow created"
    );
    Ok(edge)
}

/// Remove the active follow edge from `follower_id` to `following_id`.
///
/// Marks the edge removed and lowers both counters (floored at 0) in one
/// transaction.
///
/// # Errors
///
/// Returns `NotFound` when no active edge exists.
pub async fn unfollow(
    follower_id: AccountId,
    following_id: AccountId,
    deps: &EngineDeps,
) -> EngineResult<Follow> {
    let mut tx = deps.db_pool.begin().await?;

    let existing = Follow::find_for_update(follower_id, following_id, &mut *tx).await?;
    match existing {
        Some(edge) if edge.status == FollowStatus::Active => {}
        _ => return Err(EngineError::NotFound("follow relationship")),
    }

    let edge =
        Follow::set_status(follower_id, following_id, FollowStatus::Removed, &mut *tx).await?;
    Account::remove_follow_counters(follower_id, following_id, &mut *tx).await?;
    tx.commit().await?;

    info!(
        follower_id = %follower_id,
        following_id = %following_id,
        "Follow removed"
    );
    Ok(edge)
}
