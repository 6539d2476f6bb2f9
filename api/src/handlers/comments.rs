//! Comment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::CreatedResponse;
use crate::app::{AddComment, DeleteComment, ListComments};
use crate::domain::entities::Comment;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub author_id: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id().to_string(),
            post_id: comment.post_id().to_string(),
            author_id: comment.author_id().to_string(),
            content: comment.content().to_string(),
            created_at: comment.created_at().to_string(),
        }
    }
}

/// POST /posts/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state
        .dispatcher
        .execute(AddComment {
            post_id,
            author_id: request.author_id,
            content: request.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// GET /posts/:id/comments
///
/// Oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = state.dispatcher.ask(ListComments { post_id }).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// DELETE /posts/:id/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .dispatcher
        .execute(DeleteComment {
            post_id,
            comment_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
