use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use uuid::Uuid;

use super::models::{
    Blog, BlogQuery, BlogUpdate, Comment, NewBlog, NewComment, NewWishlistItem, WishlistItem,
};
use super::{DatabaseError, Store};
use crate::config::DatabaseConfig;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS blogs (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        image TEXT NOT NULL,
        category TEXT NOT NULL,
        short_description TEXT NOT NULL,
        long_description TEXT NOT NULL,
        user_email TEXT NOT NULL,
        user_name TEXT,
        user_image TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id UUID PRIMARY KEY,
        blog_id UUID NOT NULL REFERENCES blogs (id) ON DELETE CASCADE,
        comment TEXT NOT NULL,
        user_email TEXT NOT NULL,
        user_name TEXT,
        user_image TEXT,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS wishlist (
        id UUID PRIMARY KEY,
        blog_id UUID NOT NULL,
        user_email TEXT NOT NULL,
        title TEXT NOT NULL,
        image TEXT NOT NULL,
        category TEXT NOT NULL,
        short_description TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        UNIQUE (blog_id, user_email)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS comments_blog_id_idx ON comments (blog_id)",
    "CREATE INDEX IF NOT EXISTS wishlist_user_email_idx ON wishlist (user_email)",
];

const BLOG_COLUMNS: &str = "id, title, image, category, short_description, long_description, \
     user_email, user_name, user_image, created_at, updated_at";

/// PostgreSQL-backed store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// Translate constraint violations into domain errors
fn map_write_error(err: sqlx::Error, context: impl FnOnce() -> String) -> DatabaseError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            Some(UNIQUE_VIOLATION) => return DatabaseError::Conflict(context()),
            Some(FOREIGN_KEY_VIOLATION) => return DatabaseError::NotFound(context()),
            _ => {}
        }
    }
    DatabaseError::Sqlx(err)
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_blogs(&self, query: &BlogQuery) -> Result<Vec<Blog>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM blogs \
             WHERE ($1::TEXT IS NULL OR category = $1) \
               AND ($2::TEXT IS NULL OR POSITION(LOWER($2) IN LOWER(title)) > 0) \
             ORDER BY created_at DESC",
            BLOG_COLUMNS
        );
        let blogs = sqlx::query_as::<_, Blog>(&sql)
            .bind(query.category.as_deref())
            .bind(query.search.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(blogs)
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, DatabaseError> {
        let sql = format!("SELECT {} FROM blogs WHERE id = $1", BLOG_COLUMNS);
        let blog = sqlx::query_as::<_, Blog>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, DatabaseError> {
        let blog = blog.into_blog(Utc::now());
        sqlx::query(
            "INSERT INTO blogs (id, title, image, category, short_description, long_description, \
             user_email, user_name, user_image, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.image)
        .bind(&blog.category)
        .bind(&blog.short_description)
        .bind(&blog.long_description)
        .bind(&blog.user_email)
        .bind(&blog.user_name)
        .bind(&blog.user_image)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(blog)
    }

    async fn update_blog(&self, id: Uuid, changes: BlogUpdate) -> Result<Blog, DatabaseError> {
        let sql = format!(
            "UPDATE blogs SET \
               title = COALESCE($2, title), \
               image = COALESCE($3, image), \
               category = COALESCE($4, category), \
               short_description = COALESCE($5, short_description), \
               long_description = COALESCE($6, long_description), \
               updated_at = $7 \
             WHERE id = $1 \
             RETURNING {}",
            BLOG_COLUMNS
        );
        sqlx::query_as::<_, Blog>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.image)
            .bind(changes.category)
            .bind(changes.short_description)
            .bind(changes.long_description)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Blog {} not found", id)))
    }

    async fn list_comments(&self, blog_id: Uuid) -> Result<Vec<Comment>, DatabaseError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, blog_id, comment, user_email, user_name, user_image, created_at \
             FROM comments WHERE blog_id = $1 ORDER BY created_at ASC",
        )
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let comment = comment.into_comment(Utc::now());
        sqlx::query(
            "INSERT INTO comments (id, blog_id, comment, user_email, user_name, user_image, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(comment.id)
        .bind(comment.blog_id)
        .bind(&comment.comment)
        .bind(&comment.user_email)
        .bind(&comment.user_name)
        .bind(&comment.user_image)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || format!("Blog {} not found", comment.blog_id)))?;
        Ok(comment)
    }

    async fn list_wishlist(&self, user_email: &str) -> Result<Vec<WishlistItem>, DatabaseError> {
        let items = sqlx::query_as::<_, WishlistItem>(
            "SELECT id, blog_id, user_email, title, image, category, short_description, created_at \
             FROM wishlist WHERE user_email = $1 ORDER BY created_at DESC",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn insert_wishlist(&self, item: NewWishlistItem) -> Result<WishlistItem, DatabaseError> {
        let item = item.into_item(Utc::now());
        sqlx::query(
            "INSERT INTO wishlist (id, blog_id, user_email, title, image, category, short_description, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(item.id)
        .bind(item.blog_id)
        .bind(&item.user_email)
        .bind(&item.title)
        .bind(&item.image)
        .bind(&item.category)
        .bind(&item.short_description)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || format!("Blog {} is already in the wishlist", item.blog_id))
        })?;
        Ok(item)
    }

    async fn delete_wishlist(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM wishlist WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Wishlist item {} not found", id)));
        }
        Ok(())
    }
}
