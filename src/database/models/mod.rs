pub mod blog;
pub mod comment;
pub mod wishlist;

pub use blog::{Blog, BlogQuery, BlogUpdate, NewBlog};
pub use comment::{Comment, NewComment};
pub use wishlist::{NewWishlistItem, WishlistItem};

use std::collections::HashMap;

/// Field-level validation failures for an inbound payload
#[derive(Debug, Default, thiserror::Error)]
#[error("Missing required fields")]
pub struct ValidationError {
    pub field_errors: HashMap<String, String>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = self.field_errors.keys().cloned().collect();
        fields.sort();
        fields
    }

    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.field_errors
                .insert(field.to_string(), "This field is required".to_string());
        }
    }

    fn non_blank(&mut self, field: &str, value: Option<&String>) {
        if let Some(value) = value {
            if value.trim().is_empty() {
                self.field_errors
                    .insert(field.to_string(), "This field cannot be blank".to_string());
            }
        }
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.field_errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for crate::error::ApiError {
    fn from(err: ValidationError) -> Self {
        crate::error::ApiError::validation_error("Missing required fields", Some(err.field_errors))
    }
}
