pub mod auth;
pub mod response;

pub use auth::{require_session, AuthUser};
pub use response::{ApiResponse, ApiResult};
