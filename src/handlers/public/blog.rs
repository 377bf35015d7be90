use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::{Blog, BlogQuery};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /blogs - all blogs, newest first, optionally filtered by
/// `category` (exact) and `search` (title substring)
pub async fn list_blogs(
    State(state): State<AppState>,
    query: Result<Query<BlogQuery>, QueryRejection>,
) -> ApiResult<Vec<Blog>> {
    let Query(query) = query?;
    let blogs = state.store.list_blogs(&query.normalized()).await?;
    Ok(ApiResponse::success(blogs))
}

/// GET /blog/:id
pub async fn get_blog(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Blog> {
    let Path(id) = id?;
    let blog = state
        .store
        .find_blog(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Blog {} not found", id)))?;
    Ok(ApiResponse::success(blog))
}
