// PostgreSQL store checks. They run only when DATABASE_URL points at a
// reachable server and are skipped otherwise. Rows are keyed by fresh
// UUIDs so repeated runs against one database do not collide.

use anyhow::{Context, Result};
use uuid::Uuid;

use blog_api::config::DatabaseConfig;
use blog_api::database::models::{BlogQuery, BlogUpdate, NewBlog, NewComment, NewWishlistItem};
use blog_api::database::{DatabaseError, PgStore, Store};

async fn pg_store() -> Result<Option<PgStore>> {
    let _ = dotenvy::dotenv();
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set; skipping PostgreSQL store test");
            return Ok(None);
        }
    };

    let config = DatabaseConfig {
        url: Some(url.clone()),
        max_connections: 2,
        connection_timeout: 10,
    };
    let store = PgStore::connect(&url, &config)
        .await
        .context("failed to connect to DATABASE_URL")?;
    store.ensure_schema().await?;
    // Schema creation is idempotent
    store.ensure_schema().await?;
    Ok(Some(store))
}

fn new_blog(title: &str, category: &str, owner: &str) -> NewBlog {
    NewBlog {
        title: title.to_string(),
        image: "https://img.test/cover.png".to_string(),
        category: category.to_string(),
        short_description: "A short summary".to_string(),
        long_description: "A much longer body of text".to_string(),
        user_email: owner.to_string(),
        user_name: Some("Test Author".to_string()),
        user_image: None,
    }
}

#[tokio::test]
async fn pg_partial_update_keeps_owner_and_untouched_fields() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };
    let owner = format!("{}@example.com", Uuid::new_v4());

    let blog = store.insert_blog(new_blog("Draft", "rust", &owner)).await?;
    let updated = store
        .update_blog(
            blog.id,
            BlogUpdate {
                title: Some("Published".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.title, "Published");
    assert_eq!(updated.category, "rust");
    assert_eq!(updated.long_description, blog.long_description);
    assert_eq!(updated.user_email, owner);
    assert!(updated.updated_at >= blog.updated_at);

    let result = store.update_blog(Uuid::new_v4(), BlogUpdate::default()).await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn pg_list_blogs_filters_by_category_and_case_insensitive_search() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };
    let category = format!("cat-{}", Uuid::new_v4());
    let owner = "lister@example.com";

    store.insert_blog(new_blog("Async Rust", &category, owner)).await?;
    store.insert_blog(new_blog("Rust MACROS", &category, owner)).await?;

    let all = store
        .list_blogs(&BlogQuery {
            category: Some(category.clone()),
            search: None,
        })
        .await?;
    assert_eq!(all.len(), 2);
    // Newest first
    assert_eq!(all[0].title, "Rust MACROS");

    let found = store
        .list_blogs(&BlogQuery {
            category: Some(category.clone()),
            search: Some("macro".to_string()),
        })
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Rust MACROS");
    Ok(())
}

#[tokio::test]
async fn pg_comment_on_missing_blog_is_not_found() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };

    let result = store
        .insert_comment(NewComment {
            blog_id: Uuid::new_v4(),
            comment: "Hello?".to_string(),
            user_email: "reader@example.com".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));

    let blog = store
        .insert_blog(new_blog("Discuss", "rust", "author@example.com"))
        .await?;
    for text in ["First!", "Second"] {
        store
            .insert_comment(NewComment {
                blog_id: blog.id,
                comment: text.to_string(),
                user_email: "reader@example.com".to_string(),
                ..Default::default()
            })
            .await?;
    }
    let comments = store.list_comments(blog.id).await?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].comment, "First!");
    Ok(())
}

#[tokio::test]
async fn pg_duplicate_wishlist_entry_is_conflict() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };
    let reader = format!("{}@example.com", Uuid::new_v4());
    let blog = store
        .insert_blog(new_blog("Keep me", "rust", "author@example.com"))
        .await?;

    let item = NewWishlistItem {
        blog_id: blog.id,
        user_email: reader.clone(),
        title: blog.title.clone(),
        image: blog.image.clone(),
        category: blog.category.clone(),
        short_description: blog.short_description.clone(),
    };

    let saved = store.insert_wishlist(item.clone()).await?;
    let result = store.insert_wishlist(item).await;
    assert!(matches!(result, Err(DatabaseError::Conflict(_))));

    let items = store.list_wishlist(&reader).await?;
    assert_eq!(items.len(), 1);

    store.delete_wishlist(saved.id).await?;
    let result = store.delete_wishlist(saved.id).await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));
    assert!(store.list_wishlist(&reader).await?.is_empty());
    Ok(())
}
