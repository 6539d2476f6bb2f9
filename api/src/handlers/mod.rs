//! HTTP handlers
//!
//! Axum request handlers. Each one turns the request into a Command or
//! Query and hands it to the dispatcher; none of them touch a repository.

pub mod comments;
pub mod posts;
pub mod users;

use serde::Serialize;

pub use comments::{add_comment, delete_comment, list_comments};
pub use posts::{archive_post, create_post, delete_post, get_post, list_posts, publish_post};
pub use users::{change_password, delete_user, get_user, list_users, register_user};

/// Body returned by every create endpoint
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

impl CreatedResponse {
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}
