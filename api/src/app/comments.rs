//! Comment use cases

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::dispatcher::{Command, Handler, Query, Request};
use crate::domain::entities::Comment;
use crate::domain::ports::{CommentRepository, PostRepository, UserRepository};
use crate::domain::value_objects::{CommentId, Content, PostId, UserId};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AddComment {
    pub post_id: String,
    pub author_id: String,
    pub content: String,
}

impl Request for AddComment {
    type Output = CommentId;
    const NAME: &'static str = "AddComment";
}
impl Command for AddComment {}

/// Remove one comment from a post. A comment that is already gone is not
/// an error; one that sits under a different post is reported as missing.
#[derive(Debug, Clone)]
pub struct DeleteComment {
    pub post_id: String,
    pub comment_id: String,
}

impl Request for DeleteComment {
    type Output = ();
    const NAME: &'static str = "DeleteComment";
}
impl Command for DeleteComment {}

/// Comments on a post, oldest first
#[derive(Debug, Clone)]
pub struct ListComments {
    pub post_id: String,
}

impl Request for ListComments {
    type Output = Vec<Comment>;
    const NAME: &'static str = "ListComments";
}
impl Query for ListComments {}

/// Handles every comment request type
pub struct CommentHandlers<CR, PR, UR>
where
    CR: CommentRepository,
    PR: PostRepository,
    UR: UserRepository,
{
    comments: Arc<CR>,
    posts: Arc<PR>,
    users: Arc<UR>,
}

impl<CR, PR, UR> Clone for CommentHandlers<CR, PR, UR>
where
    CR: CommentRepository,
    PR: PostRepository,
    UR: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            comments: self.comments.clone(),
            posts: self.posts.clone(),
            users: self.users.clone(),
        }
    }
}

impl<CR, PR, UR> CommentHandlers<CR, PR, UR>
where
    CR: CommentRepository,
    PR: PostRepository,
    UR: UserRepository,
{
    pub fn new(comments: Arc<CR>, posts: Arc<PR>, users: Arc<UR>) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    async fn require_post(&self, post_id: &PostId) -> Result<(), AppError> {
        match self.posts.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Post {} not found", post_id))),
        }
    }
}

#[async_trait]
impl<CR, PR, UR> Handler<AddComment> for CommentHandlers<CR, PR, UR>
where
    CR: CommentRepository,
    PR: PostRepository,
    UR: UserRepository,
{
    async fn handle(&self, request: AddComment) -> Result<CommentId, AppError> {
        let post_id = PostId::from_string(&request.post_id)?;
        let author_id = UserId::from_string(&request.author_id)?;
        let content = Content::from_string(&request.content)?;

        self.require_post(&post_id).await?;
        if self.users.find_by_id(&author_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", author_id)));
        }

        let comment = Comment::create(CommentId::generate(), content, post_id, author_id);
        self.comments.save(&comment).await?;

        tracing::info!(comment_id = %comment.id(), post_id = %post_id, "Comment added");
        Ok(*comment.id())
    }
}

#[async_trait]
impl<CR, PR, UR> Handler<DeleteComment> for CommentHandlers<CR, PR, UR>
where
    CR: CommentRepository,
    PR: PostRepository,
    UR: UserRepository,
{
    async fn handle(&self, request: DeleteComment) -> Result<(), AppError> {
        let post_id = PostId::from_string(&request.post_id)?;
        let comment_id = CommentId::from_string(&request.comment_id)?;

        let Some(comment) = self.comments.find_by_id(&comment_id).await? else {
            tracing::debug!(comment_id = %comment_id, "Comment already absent, nothing to delete");
            return Ok(());
        };
        if !comment.belongs_to(&post_id) {
            return Err(AppError::NotFound(format!(
                "Comment {} not found on post {}",
                comment_id, post_id
            )));
        }

        self.comments.delete(&comment).await?;
        tracing::info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted");
        Ok(())
    }
}

#[async_trait]
impl<CR, PR, UR> Handler<ListComments> for CommentHandlers<CR, PR, UR>
where
    CR: CommentRepository,
    PR: PostRepository,
    UR: UserRepository,
{
    async fn handle(&self, request: ListComments) -> Result<Vec<Comment>, AppError> {
        let post_id = PostId::from_string(&request.post_id)?;
        self.require_post(&post_id).await?;
        Ok(self.comments.find_by_post(&post_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::test_utils::{
        test_comment, test_draft_post, test_user, InMemoryCommentRepository,
        InMemoryPostRepository, InMemoryUserRepository,
    };

    #[tokio::test]
    async fn add_and_list_in_order() {
        let post = test_draft_post();
        let author = test_user();
        let comments = Arc::new(InMemoryCommentRepository::new());
        let handlers = CommentHandlers::new(
            comments.clone(),
            Arc::new(InMemoryPostRepository::new().with_post(post.clone())),
            Arc::new(InMemoryUserRepository::new().with_user(author.clone())),
        );

        let mut ids = Vec::new();
        for text in ["First comment here", "Second comment here"] {
            let id = handlers
                .handle(AddComment {
                    post_id: post.id().to_string(),
                    author_id: author.id().to_string(),
                    content: text.to_string(),
                })
                .await
                .unwrap();
            ids.push(id);
        }

        let listed = handlers
            .handle(ListComments {
                post_id: post.id().to_string(),
            })
            .await
            .unwrap();
        let listed_ids: Vec<_> = listed.iter().map(|c| *c.id()).collect();
        assert_eq!(listed_ids, ids);
        assert_eq!(listed[0].content().as_str(), "First comment here");
        assert_eq!(listed[0].author_id(), author.id());
    }

    #[tokio::test]
    async fn add_requires_post_and_author() {
        let post = test_draft_post();
        let author = test_user();
        let handlers = CommentHandlers::new(
            Arc::new(InMemoryCommentRepository::new()),
            Arc::new(InMemoryPostRepository::new().with_post(post.clone())),
            Arc::new(InMemoryUserRepository::new().with_user(author.clone())),
        );

        let no_post = handlers
            .handle(AddComment {
                post_id: PostId::generate().to_string(),
                author_id: author.id().to_string(),
                content: "Long enough comment".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(no_post, AppError::NotFound(_)));

        let no_author = handlers
            .handle(AddComment {
                post_id: post.id().to_string(),
                author_id: UserId::generate().to_string(),
                content: "Long enough comment".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(no_author, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn short_comment_is_rejected() {
        let post = test_draft_post();
        let author = test_user();
        let handlers = CommentHandlers::new(
            Arc::new(InMemoryCommentRepository::new()),
            Arc::new(InMemoryPostRepository::new().with_post(post.clone())),
            Arc::new(InMemoryUserRepository::new().with_user(author.clone())),
        );

        let err = handlers
            .handle(AddComment {
                post_id: post.id().to_string(),
                author_id: author.id().to_string(),
                content: "+1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::ContentTooShort { .. })
        ));
    }

    #[tokio::test]
    async fn delete_removes_only_the_named_comment() {
        let post = test_draft_post();
        let author = test_user();
        let keep = test_comment(post.id(), author.id());
        let gone = test_comment(post.id(), author.id());
        let comments = Arc::new(InMemoryCommentRepository::new());
        comments.save(&keep).await.unwrap();
        comments.save(&gone).await.unwrap();
        let handlers = CommentHandlers::new(
            comments.clone(),
            Arc::new(InMemoryPostRepository::new().with_post(post.clone())),
            Arc::new(InMemoryUserRepository::new().with_user(author)),
        );

        let request = DeleteComment {
            post_id: post.id().to_string(),
            comment_id: gone.id().to_string(),
        };
        handlers.handle(request.clone()).await.unwrap();
        // Second delete finds nothing and succeeds
        handlers.handle(request).await.unwrap();

        let left = comments.find_by_post(post.id()).await.unwrap();
        assert_eq!(left, vec![keep]);
    }

    #[tokio::test]
    async fn delete_under_wrong_post_is_not_found() {
        let post = test_draft_post();
        let author = test_user();
        let comment = test_comment(post.id(), author.id());
        let comments = Arc::new(InMemoryCommentRepository::new());
        comments.save(&comment).await.unwrap();
        let handlers = CommentHandlers::new(
            comments.clone(),
            Arc::new(InMemoryPostRepository::new().with_post(post)),
            Arc::new(InMemoryUserRepository::new().with_user(author)),
        );

        let err = handlers
            .handle(DeleteComment {
                post_id: PostId::generate().to_string(),
                comment_id: comment.id().to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(comments.find_by_id(comment.id()).await.unwrap().is_some());
    }
}
