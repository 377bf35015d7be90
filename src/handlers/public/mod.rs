// Handlers reachable without a session
pub mod auth;
pub mod blog;
pub mod comment;
pub mod wishlist;

pub use auth::{issue_session, logout};
pub use blog::{get_blog, list_blogs};
pub use comment::{create_comment, list_comments};
pub use wishlist::{add_to_wishlist, remove_from_wishlist};
