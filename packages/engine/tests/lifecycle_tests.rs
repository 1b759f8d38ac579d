//! End-to-end lifecycle test: publish, localize, react, comment, follow,
//! then soft delete.

mod common;

use crate::common::{
    create_test_account, create_test_language, create_test_post_type, TestHarness,
};
use engine_core::common::{EngineError, PageArgs};
use engine_core::domains::accounts::actions::follow;
use engine_core::domains::accounts::models::Account;
use engine_core::domains::posts::actions::{
    add_comment, add_like, create_article, delete_post, get_post_by_id, get_posts_paginated,
    CreatePost, PostFilters, PostSort,
};
use engine_core::domains::posts::models::{LocalizationInput, MediaInput, MediaKind};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn publish_engage_delete_round_trip(ctx: &TestHarness) {
    let deps = ctx.deps();
    let writer = create_test_account(&ctx.db_pool, "writer").await.unwrap();
    let reader = create_test_account(&ctx.db_pool, "reader").await.unwrap();
    let post_type_id = create_test_post_type(&ctx.db_pool).await.unwrap();
    let spanish = create_test_language(&ctx.db_pool, "Spanish").await.unwrap();

    // Publish a localized article with one cover image
    let article = create_article(
        CreatePost::builder()
            .author_id(writer)
            .description("neighborhood news")
            .post_type_id(post_type_id)
            .media(vec![MediaInput {
                url: "https://cdn.example/cover.jpg".to_string(),
                kind: MediaKind::Image,
                display_order: 0,
            }])
            .localizations(vec![LocalizationInput {
                language_id: spanish,
                text: "noticias del barrio".to_string(),
            }])
            .build(),
        &deps,
    )
    .await
    .unwrap();

    // Reader engages
    follow(reader, writer, &deps).await.unwrap();
    add_like(reader, article.id, &deps).await.unwrap();
    add_comment(article.id, reader, None, "good read", &deps)
        .await
        .unwrap();

    let hydrated = get_post_by_id(article.id, false, &deps).await.unwrap();
    assert_eq!(hydrated.reaction_count, 1);
    assert_eq!(hydrated.comment_count, 1);
    assert_eq!(hydrated.media.len(), 1);
    assert_eq!(hydrated.description_in(spanish), "noticias del barrio");

    let writer_account = Account::find_by_id(writer, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(writer_account.post_count, 1);
    assert_eq!(writer_account.followers_count, 1);
    assert_eq!(writer_account.received_reactions_count, 1);

    // Delete: gone from reads and listings, post_count restored
    let deleted = delete_post(article.id, &deps).await.unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.deleted_at.is_some());

    let err = get_post_by_id(article.id, false, &deps).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));

    let filters = PostFilters {
        author_id: Some(writer),
        ..Default::default()
    };
    let page = get_posts_paginated(&filters, PostSort::default(), PageArgs::default(), &deps)
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);

    let writer_account = Account::find_by_id(writer, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(writer_account.post_count, 0);

    // Deleting twice is NotFound
    let err = delete_post(article.id, &deps).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}
