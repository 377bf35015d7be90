// handlers/protected/blog.rs - blog routes behind the session gate
//
// POST /blog and PUT /blog/:id require a session but do not compare the
// session identity with the post's owner. GET /update does both checks.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::{Blog, BlogUpdate, NewBlog};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct UpdateLookup {
    pub id: Uuid,
    pub email: String,
}

/// POST /blog
pub async fn create_blog(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<NewBlog>, JsonRejection>,
) -> ApiResult<Blog> {
    let Json(payload) = payload?;
    payload.validate()?;

    let blog = state.store.insert_blog(payload).await?;
    tracing::info!("Blog {} created by session {}", blog.id, user.email);
    Ok(ApiResponse::created(blog))
}

/// PUT /blog/:id
pub async fn update_blog(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BlogUpdate>, JsonRejection>,
) -> ApiResult<Blog> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let blog = state.store.update_blog(id, payload).await?;
    tracing::info!("Blog {} updated by session {}", blog.id, user.email);
    Ok(ApiResponse::success(blog))
}

/// GET /update?id=&email= - load a blog for editing.
///
/// `email` must be the session identity and must own the blog.
pub async fn blog_for_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<UpdateLookup>, QueryRejection>,
) -> ApiResult<Blog> {
    let Query(lookup) = query?;
    user.authorize(&lookup.email)?;

    let blog = state
        .store
        .find_blog(lookup.id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Blog {} not found", lookup.id)))?;
    user.authorize(&blog.user_email)?;

    Ok(ApiResponse::success(blog))
}
