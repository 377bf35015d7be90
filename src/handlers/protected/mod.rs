// Handlers mounted behind `require_session`; each may read `AuthUser`
pub mod blog;
pub mod wishlist;

pub use blog::{blog_for_update, create_blog, update_blog};
pub use wishlist::user_wishlist;
