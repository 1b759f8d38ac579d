//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.
//! Catalog rows (post types, languages) have unique-name constraints, so
//! fixtures generate distinct names per call; tests on the shared database
//! never collide.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use engine_core::common::{AccountId, LanguageId, PostId, PostTypeId};
use engine_core::domains::catalog::models::{Language, PostType};
use engine_core::domains::posts::actions::{create_normal_post, CreatePost};
use engine_core::domains::accounts::models::Account;
use engine_core::kernel::EngineDeps;
use sqlx::PgPool;

static FIXTURE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Monotonic suffix for unique-constrained fixture names.
pub fn unique_suffix() -> u64 {
    FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// Create a test account.
pub async fn create_test_account(pool: &PgPool, display_name: &str) -> Result<AccountId> {
    let account = Account::create(display_name, pool).await?;
    Ok(account.id)
}

/// Create a test post type with a unique name.
pub async fn create_test_post_type(pool: &PgPool) -> Result<PostTypeId> {
    let name = format!("test-type-{}", unique_suffix());
    let post_type = PostType::create(&name, pool).await?;
    Ok(post_type.id)
}

/// Create a test language with a unique code.
pub async fn create_test_language(pool: &PgPool, name: &str) -> Result<LanguageId> {
    let code = format!("x{}", unique_suffix());
    let language = Language::create(&code, name, pool).await?;
    Ok(language.id)
}

/// Create a plain normal post with no media or localizations.
pub async fn create_test_post(
    author_id: AccountId,
    post_type_id: PostTypeId,
    description: &str,
    deps: &EngineDeps,
) -> Result<PostId> {
    let post = create_normal_post(
        CreatePost::builder()
            .author_id(author_id)
            .description(description)
            .post_type_id(post_type_id)
            .build(),
        deps,
    )
    .await?;
    Ok(post.id)
}
