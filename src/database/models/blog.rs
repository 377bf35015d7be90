use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    /// Owner of the post
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /blog body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewBlog {
    pub title: String,
    pub image: String,
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
}

impl NewBlog {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        errors.required("title", &self.title);
        errors.required("image", &self.image);
        errors.required("category", &self.category);
        errors.required("short_description", &self.short_description);
        errors.required("long_description", &self.long_description);
        errors.required("user_email", &self.user_email);
        errors.into_result()
    }

    pub fn into_blog(self, now: DateTime<Utc>) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: self.title,
            image: self.image,
            category: self.category,
            short_description: self.short_description,
            long_description: self.long_description,
            user_email: self.user_email,
            user_name: self.user_name,
            user_image: self.user_image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// PUT /blog/:id body. Absent fields are left untouched; the owner is fixed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
}

impl BlogUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        errors.non_blank("title", self.title.as_ref());
        errors.non_blank("image", self.image.as_ref());
        errors.non_blank("category", self.category.as_ref());
        errors.non_blank("short_description", self.short_description.as_ref());
        errors.non_blank("long_description", self.long_description.as_ref());
        errors.into_result()
    }

    pub fn apply(self, blog: &mut Blog, now: DateTime<Utc>) {
        if let Some(v) = self.title {
            blog.title = v;
        }
        if let Some(v) = self.image {
            blog.image = v;
        }
        if let Some(v) = self.category {
            blog.category = v;
        }
        if let Some(v) = self.short_description {
            blog.short_description = v;
        }
        if let Some(v) = self.long_description {
            blog.long_description = v;
        }
        blog.updated_at = now;
    }
}

/// GET /blogs query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogQuery {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

impl BlogQuery {
    /// Drop blank parameters so `?category=` means "any category"
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            category: keep(self.category),
            search: keep(self.search),
        }
    }

    pub fn matches(&self, blog: &Blog) -> bool {
        if let Some(category) = &self.category {
            if &blog.category != category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !blog.title.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}
