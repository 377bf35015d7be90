use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub comment: String,
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// POST /comment body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewComment {
    pub blog_id: Uuid,
    pub comment: String,
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        if self.blog_id.is_nil() {
            errors
                .field_errors
                .insert("blog_id".to_string(), "This field is required".to_string());
        }
        errors.required("comment", &self.comment);
        errors.required("user_email", &self.user_email);
        errors.into_result()
    }

    pub fn into_comment(self, now: DateTime<Utc>) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            blog_id: self.blog_id,
            comment: self.comment,
            user_email: self.user_email,
            user_name: self.user_name,
            user_image: self.user_image,
            created_at: now,
        }
    }
}
