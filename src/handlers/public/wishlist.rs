use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::{NewWishlistItem, WishlistItem};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
    pub deleted: bool,
}

/// POST /wishlist
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    payload: Result<Json<NewWishlistItem>, JsonRejection>,
) -> ApiResult<WishlistItem> {
    let Json(payload) = payload?;
    payload.validate()?;

    let item = state.store.insert_wishlist(payload).await?;
    Ok(ApiResponse::created(item))
}

/// DELETE /wishlist/:id
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Deleted> {
    let Path(id) = id?;
    state.store.delete_wishlist(id).await?;
    Ok(ApiResponse::success(Deleted { id, deleted: true }))
}
