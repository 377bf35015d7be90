use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::{Comment, NewComment};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    pub blog_id: Uuid,
}

/// GET /comments?blog_id=
pub async fn list_comments(
    State(state): State<AppState>,
    query: Result<Query<CommentQuery>, QueryRejection>,
) -> ApiResult<Vec<Comment>> {
    let Query(query) = query?;
    let comments = state.store.list_comments(query.blog_id).await?;
    Ok(ApiResponse::success(comments))
}

/// POST /comment
pub async fn create_comment(
    State(state): State<AppState>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<Comment> {
    let Json(payload) = payload?;
    payload.validate()?;

    let comment = state.store.insert_comment(payload).await?;
    tracing::info!("Comment {} added to blog {}", comment.id, comment.blog_id);
    Ok(ApiResponse::created(comment))
}
