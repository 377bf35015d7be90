pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use models::{Blog, BlogQuery, BlogUpdate, Comment, NewBlog, NewComment, NewWishlistItem, WishlistItem};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors from a storage backend
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for blogs, comments and wishlist items. Each operation is a
/// single collection call; there is no cross-collection transaction.
#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Blogs matching `query`, newest first
    async fn list_blogs(&self, query: &BlogQuery) -> Result<Vec<Blog>, DatabaseError>;
    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, DatabaseError>;
    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, DatabaseError>;
    /// Fails with `NotFound` when no blog has this id
    async fn update_blog(&self, id: Uuid, changes: BlogUpdate) -> Result<Blog, DatabaseError>;

    /// Comments on a blog, oldest first
    async fn list_comments(&self, blog_id: Uuid) -> Result<Vec<Comment>, DatabaseError>;
    /// Fails with `NotFound` when the blog does not exist
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, DatabaseError>;

    /// Wishlist items owned by `user_email`, newest first
    async fn list_wishlist(&self, user_email: &str) -> Result<Vec<WishlistItem>, DatabaseError>;
    /// Fails with `Conflict` when the user already saved this blog
    async fn insert_wishlist(&self, item: NewWishlistItem) -> Result<WishlistItem, DatabaseError>;
    /// Fails with `NotFound` when no item has this id
    async fn delete_wishlist(&self, id: Uuid) -> Result<(), DatabaseError>;
}

/// Open the configured backend: PostgreSQL when a database URL is set,
/// otherwise a process-local in-memory store.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    match config.database.url.as_deref() {
        Some(url) => {
            let store = PgStore::connect(url, &config.database).await?;
            store.ensure_schema().await?;
            info!(
                "Connected to PostgreSQL at {}",
                config.redacted_database_url().unwrap_or_default()
            );
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
