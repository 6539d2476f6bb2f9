//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use crate::app::password::hash_password;
use crate::domain::entities::{Comment, Post, User};
use crate::domain::value_objects::{CommentId, Content, Email, PostId, Role, Title, UserId};

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Create a test user with a unique email
pub fn test_user() -> User {
    let id = UserId::generate();
    User::register(
        id,
        Email::from_string(&format!("user-{}@example.com", id)).unwrap(),
        hash_password(TEST_PASSWORD),
        Role::User,
    )
}

/// Create a test admin
pub fn test_admin() -> User {
    let id = UserId::generate();
    User::register(
        id,
        Email::from_string(&format!("admin-{}@example.com", id)).unwrap(),
        hash_password(TEST_PASSWORD),
        Role::Admin,
    )
}

/// Create a draft post by a random author
pub fn test_draft_post() -> Post {
    test_post_by(&UserId::generate())
}

/// Create a draft post by a specific author
pub fn test_post_by(author_id: &UserId) -> Post {
    Post::create(
        PostId::generate(),
        Title::from_string("Hello World").unwrap(),
        Content::from_string("This is more than ten characters").unwrap(),
        *author_id,
    )
}

/// Create a post that has already been published
pub fn test_published_post() -> Post {
    let mut post = test_draft_post();
    post.publish().unwrap();
    post
}

/// Create a comment on a post
pub fn test_comment(post_id: &PostId, author_id: &UserId) -> Comment {
    Comment::create(
        CommentId::generate(),
        Content::from_string("Nice write-up, thanks!").unwrap(),
        *post_id,
        *author_id,
    )
}
