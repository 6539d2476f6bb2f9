//! Comment entity

use crate::domain::value_objects::{CommentId, Content, PostId, Timestamp, UserId};

/// A comment left by a user on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    content: Content,
    post_id: PostId,
    author_id: UserId,
    created_at: Timestamp,
}

impl Comment {
    pub fn create(id: CommentId, content: Content, post_id: PostId, author_id: UserId) -> Self {
        Self {
            id,
            content,
            post_id,
            author_id,
            created_at: Timestamp::now(),
        }
    }

    pub fn restore(
        id: CommentId,
        content: Content,
        post_id: PostId,
        author_id: UserId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            content,
            post_id,
            author_id,
            created_at,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn belongs_to(&self, post_id: &PostId) -> bool {
        &self.post_id == post_id
    }
}
