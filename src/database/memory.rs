use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{
    Blog, BlogQuery, BlogUpdate, Comment, NewBlog, NewComment, NewWishlistItem, WishlistItem,
};
use super::{DatabaseError, Store};

#[derive(Default)]
struct Collections {
    blogs: Vec<Blog>,
    comments: Vec<Comment>,
    wishlist: Vec<WishlistItem>,
}

/// Store kept entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn list_blogs(&self, query: &BlogQuery) -> Result<Vec<Blog>, DatabaseError> {
        let collections = self.collections.read().await;
        // Reverse first so equal timestamps keep newest-inserted first
        let mut blogs: Vec<Blog> = collections
            .blogs
            .iter()
            .rev()
            .filter(|blog| query.matches(blog))
            .cloned()
            .collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs)
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections.blogs.iter().find(|blog| blog.id == id).cloned())
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, DatabaseError> {
        let blog = blog.into_blog(Utc::now());
        self.collections.write().await.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update_blog(&self, id: Uuid, changes: BlogUpdate) -> Result<Blog, DatabaseError> {
        let mut collections = self.collections.write().await;
        let blog = collections
            .blogs
            .iter_mut()
            .find(|blog| blog.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Blog {} not found", id)))?;
        changes.apply(blog, Utc::now());
        Ok(blog.clone())
    }

    async fn list_comments(&self, blog_id: Uuid) -> Result<Vec<Comment>, DatabaseError> {
        let collections = self.collections.read().await;
        let mut comments: Vec<Comment> = collections
            .comments
            .iter()
            .filter(|comment| comment.blog_id == blog_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let mut collections = self.collections.write().await;
        if !collections.blogs.iter().any(|blog| blog.id == comment.blog_id) {
            return Err(DatabaseError::NotFound(format!("Blog {} not found", comment.blog_id)));
        }
        let comment = comment.into_comment(Utc::now());
        collections.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_wishlist(&self, user_email: &str) -> Result<Vec<WishlistItem>, DatabaseError> {
        let collections = self.collections.read().await;
        let mut items: Vec<WishlistItem> = collections
            .wishlist
            .iter()
            .rev()
            .filter(|item| item.user_email == user_email)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn insert_wishlist(&self, item: NewWishlistItem) -> Result<WishlistItem, DatabaseError> {
        let mut collections = self.collections.write().await;
        let duplicate = collections
            .wishlist
            .iter()
            .any(|existing| existing.blog_id == item.blog_id && existing.user_email == item.user_email);
        if duplicate {
            return Err(DatabaseError::Conflict(format!(
                "Blog {} is already in the wishlist",
                item.blog_id
            )));
        }
        let item = item.into_item(Utc::now());
        collections.wishlist.push(item.clone());
        Ok(item)
    }

    async fn delete_wishlist(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut collections = self.collections.write().await;
        let before = collections.wishlist.len();
        collections.wishlist.retain(|item| item.id != id);
        if collections.wishlist.len() == before {
            return Err(DatabaseError::NotFound(format!("Wishlist item {} not found", id)));
        }
        Ok(())
    }
}
