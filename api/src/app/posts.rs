//! Post use cases
//!
//! Commands: create, publish, archive, delete.
//! Queries: get one, list all, list published, list by author.

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::dispatcher::{Command, Handler, Query, Request};
use crate::domain::entities::Post;
use crate::domain::ports::{CommentRepository, PostRepository, UserRepository};
use crate::domain::value_objects::{Content, PostId, Title, UserId};
use crate::error::AppError;

// ============================================================================
// Requests
// ============================================================================

/// Start a new draft post
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

impl Request for CreatePost {
    type Output = PostId;
    const NAME: &'static str = "CreatePost";
}
impl Command for CreatePost {}

#[derive(Debug, Clone)]
pub struct PublishPost {
    pub post_id: String,
}

impl Request for PublishPost {
    type Output = ();
    const NAME: &'static str = "PublishPost";
}
impl Command for PublishPost {}

#[derive(Debug, Clone)]
pub struct ArchivePost {
    pub post_id: String,
}

impl Request for ArchivePost {
    type Output = ();
    const NAME: &'static str = "ArchivePost";
}
impl Command for ArchivePost {}

/// Remove a post and its comments. The author is left alone, and a post
/// that is already gone is not an error.
#[derive(Debug, Clone)]
pub struct DeletePost {
    pub post_id: String,
}

impl Request for DeletePost {
    type Output = ();
    const NAME: &'static str = "DeletePost";
}
impl Command for DeletePost {}

#[derive(Debug, Clone)]
pub struct GetPost {
    pub post_id: String,
}

impl Request for GetPost {
    type Output = Post;
    const NAME: &'static str = "GetPost";
}
impl Query for GetPost {}

/// Every post, newest first
#[derive(Debug, Clone, Default)]
pub struct ListPosts;

impl Request for ListPosts {
    type Output = Vec<Post>;
    const NAME: &'static str = "ListPosts";
}
impl Query for ListPosts {}

#[derive(Debug, Clone, Default)]
pub struct ListPublishedPosts;

impl Request for ListPublishedPosts {
    type Output = Vec<Post>;
    const NAME: &'static str = "ListPublishedPosts";
}
impl Query for ListPublishedPosts {}

#[derive(Debug, Clone)]
pub struct ListPostsByAuthor {
    pub author_id: String,
}

impl Request for ListPostsByAuthor {
    type Output = Vec<Post>;
    const NAME: &'static str = "ListPostsByAuthor";
}
impl Query for ListPostsByAuthor {}

// ============================================================================
// Handlers
// ============================================================================

/// Handles every post request type
pub struct PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    posts: Arc<PR>,
    users: Arc<UR>,
    comments: Arc<CR>,
}

impl<PR, UR, CR> Clone for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    fn clone(&self) -> Self {
        Self {
            posts: self.posts.clone(),
            users: self.users.clone(),
            comments: self.comments.clone(),
        }
    }
}

impl<PR, UR, CR> PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    pub fn new(posts: Arc<PR>, users: Arc<UR>, comments: Arc<CR>) -> Self {
        Self {
            posts,
            users,
            comments,
        }
    }

    async fn load(&self, raw_id: &str) -> Result<Post, AppError> {
        let id = PostId::from_string(raw_id)?;
        self.posts
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<CreatePost> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, request: CreatePost) -> Result<PostId, AppError> {
        let title = Title::from_string(&request.title)?;
        let content = Content::from_string(&request.content)?;
        let author_id = UserId::from_string(&request.author_id)?;

        if self.users.find_by_id(&author_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", author_id)));
        }

        let post = Post::create(PostId::generate(), title, content, author_id);
        self.posts.save(&post).await?;

        tracing::info!(post_id = %post.id(), author_id = %author_id, "Post created");
        Ok(*post.id())
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<PublishPost> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, request: PublishPost) -> Result<(), AppError> {
        let mut post = self.load(&request.post_id).await?;

        if let Err(e) = post.publish() {
            tracing::warn!(post_id = %post.id(), status = %post.status(), "Publish rejected: {}", e);
            return Err(e.into());
        }
        self.posts.save(&post).await?;

        tracing::info!(post_id = %post.id(), "Post published");
        Ok(())
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<ArchivePost> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, request: ArchivePost) -> Result<(), AppError> {
        let mut post = self.load(&request.post_id).await?;

        if let Err(e) = post.archive() {
            tracing::warn!(post_id = %post.id(), status = %post.status(), "Archive rejected: {}", e);
            return Err(e.into());
        }
        self.posts.save(&post).await?;

        tracing::info!(post_id = %post.id(), "Post archived");
        Ok(())
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<DeletePost> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, request: DeletePost) -> Result<(), AppError> {
        let post_id = PostId::from_string(&request.post_id)?;
        let Some(post) = self.posts.find_by_id(&post_id).await? else {
            tracing::debug!(post_id = %post_id, "Post already absent, nothing to delete");
            return Ok(());
        };

        let comments = self.comments.find_by_post(post.id()).await?;
        for comment in &comments {
            self.comments.delete(comment).await?;
        }
        self.posts.delete(&post).await?;

        tracing::info!(post_id = %post.id(), comments = comments.len(), "Post deleted");
        Ok(())
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<GetPost> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, request: GetPost) -> Result<Post, AppError> {
        self.load(&request.post_id).await
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<ListPosts> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, _request: ListPosts) -> Result<Vec<Post>, AppError> {
        Ok(self.posts.find_all().await?)
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<ListPublishedPosts> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, _request: ListPublishedPosts) -> Result<Vec<Post>, AppError> {
        Ok(self.posts.find_published().await?)
    }
}

#[async_trait]
impl<PR, UR, CR> Handler<ListPostsByAuthor> for PostHandlers<PR, UR, CR>
where
    PR: PostRepository,
    UR: UserRepository,
    CR: CommentRepository,
{
    async fn handle(&self, request: ListPostsByAuthor) -> Result<Vec<Post>, AppError> {
        let author_id = UserId::from_string(&request.author_id)?;
        Ok(self.posts.find_by_author(&author_id).await?)
    }
}
