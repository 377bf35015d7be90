use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

/// A blog saved by a user; unique per (blog_id, user_email)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WishlistItem {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub user_email: String,
    pub title: String,
    pub image: String,
    pub category: String,
    pub short_description: String,
    pub created_at: DateTime<Utc>,
}

/// POST /wishlist body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewWishlistItem {
    pub blog_id: Uuid,
    pub user_email: String,
    pub title: String,
    pub image: String,
    pub category: String,
    pub short_description: String,
}

impl NewWishlistItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        if self.blog_id.is_nil() {
            errors
                .field_errors
                .insert("blog_id".to_string(), "This field is required".to_string());
        }
        errors.required("user_email", &self.user_email);
        errors.required("title", &self.title);
        errors.required("image", &self.image);
        errors.required("category", &self.category);
        errors.required("short_description", &self.short_description);
        errors.into_result()
    }

    pub fn into_item(self, now: DateTime<Utc>) -> WishlistItem {
        WishlistItem {
            id: Uuid::new_v4(),
            blog_id: self.blog_id,
            user_email: self.user_email,
            title: self.title,
            image: self.image,
            category: self.category,
            short_description: self.short_description,
            created_at: now,
        }
    }
}
