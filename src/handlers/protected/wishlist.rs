use axum::extract::{rejection::PathRejection, Extension, Path, State};

use crate::app::AppState;
use crate::database::models::WishlistItem;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /wishlist/:email - the session owner's saved blogs
pub async fn user_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    email: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<WishlistItem>> {
    let Path(email) = email?;
    user.authorize(&email)?;

    let items = state.store.list_wishlist(&email).await?;
    Ok(ApiResponse::success(items))
}
