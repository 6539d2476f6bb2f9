//! Post handlers
//!
//! Endpoints for writing, publishing and browsing posts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::CreatedResponse;
use crate::app::{
    ArchivePost, CreatePost, DeletePost, GetPost, ListPosts, ListPostsByAuthor,
    ListPublishedPosts, PublishPost,
};
use crate::domain::entities::Post;
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

/// Query parameters for listing posts
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub author_id: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub author_id: String,
    pub created_at: String,
    pub published_at: Option<String>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id().to_string(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            status: post.status().to_string(),
            author_id: post.author_id().to_string(),
            created_at: post.created_at().to_string(),
            published_at: post.published_at().map(ToString::to_string),
        }
    }
}

/// POST /posts
///
/// Create a draft post.
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state
        .dispatcher
        .execute(CreatePost {
            title: request.title,
            content: request.content,
            author_id: request.author_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// GET /posts
///
/// List posts, optionally only one author's or only published ones.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = match query.author_id {
        Some(author_id) => {
            let mut posts = state
                .dispatcher
                .ask(ListPostsByAuthor { author_id })
                .await?;
            if query.published {
                posts.retain(Post::is_published);
            }
            posts
        }
        None if query.published => state.dispatcher.ask(ListPublishedPosts).await?,
        None => state.dispatcher.ask(ListPosts).await?,
    };

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.dispatcher.ask(GetPost { post_id }).await?;
    Ok(Json(post.into()))
}

/// POST /posts/:id/publish
///
/// Publish a draft. Returns the post as stored afterwards.
pub async fn publish_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    state
        .dispatcher
        .execute(PublishPost {
            post_id: post_id.clone(),
        })
        .await?;

    let post = state.dispatcher.ask(GetPost { post_id }).await?;
    Ok(Json(post.into()))
}

/// POST /posts/:id/archive
pub async fn archive_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    state
        .dispatcher
        .execute(ArchivePost {
            post_id: post_id.clone(),
        })
        .await?;

    let post = state.dispatcher.ask(GetPost { post_id }).await?;
    Ok(Json(post.into()))
}

/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.dispatcher.execute(DeletePost { post_id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
