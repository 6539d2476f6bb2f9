//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Every finder returns `Ok(None)` / an empty list for missing data;
//! errors are reserved for storage failures.

use async_trait::async_trait;

use crate::domain::entities::{Comment, Post, User};
use crate::domain::value_objects::{CommentId, Email, PostId, UserId};
use crate::error::RepositoryError;

/// Repository for Post aggregates
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert or update the post so later reads reflect its current state
    async fn save(&self, post: &Post) -> Result<(), RepositoryError>;

    /// Find a post by ID
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;

    /// All posts, newest first
    async fn find_all(&self) -> Result<Vec<Post>, RepositoryError>;

    /// Published posts, most recently published first
    async fn find_published(&self) -> Result<Vec<Post>, RepositoryError>;

    /// Posts written by one author, newest first
    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepositoryError>;

    /// Remove the post. Missing posts are ignored.
    async fn delete(&self, post: &Post) -> Result<(), RepositoryError>;
}

/// Repository for User entities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update. A second user with the same email is rejected
    /// with `RepositoryError::UniqueViolation`.
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// All users, oldest first
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;

    async fn delete(&self, user: &User) -> Result<(), RepositoryError>;
}

/// Repository for Comment entities
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn save(&self, comment: &Comment) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError>;

    /// Comments on a post in the order they were written
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError>;

    async fn delete(&self, comment: &Comment) -> Result<(), RepositoryError>;
}
