//! Post aggregate root
//!
//! A post moves through `draft -> published -> archived`. The publication
//! timestamp is stamped exactly once, on publish, and kept when archived.

use crate::domain::value_objects::{Content, PostId, Status, Timestamp, Title, UserId};
use crate::error::DomainError;

/// A blog post. State changes only through its own methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: Title,
    content: Content,
    status: Status,
    author_id: UserId,
    created_at: Timestamp,
    published_at: Option<Timestamp>,
}

/// Every field of a stored post, used to rehydrate the aggregate
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub id: PostId,
    pub title: Title,
    pub content: Content,
    pub status: Status,
    pub author_id: UserId,
    pub created_at: Timestamp,
    pub published_at: Option<Timestamp>,
}

impl Post {
    /// Start a new post as a draft
    pub fn create(id: PostId, title: Title, content: Content, author_id: UserId) -> Self {
        Self {
            id,
            title,
            content,
            status: Status::Draft,
            author_id,
            created_at: Timestamp::now(),
            published_at: None,
        }
    }

    /// Rebuild a post from storage, re-checking the publication invariant
    pub fn restore(record: PostRecord) -> Result<Self, DomainError> {
        match (record.status.has_been_published(), record.published_at) {
            (true, None) => {
                return Err(DomainError::InconsistentState(format!(
                    "{} post {} has no publication timestamp",
                    record.status, record.id
                )))
            }
            (false, Some(_)) => {
                return Err(DomainError::InconsistentState(format!(
                    "draft post {} has a publication timestamp",
                    record.id
                )))
            }
            _ => {}
        }

        Ok(Self {
            id: record.id,
            title: record.title,
            content: record.content,
            status: record.status,
            author_id: record.author_id,
            created_at: record.created_at,
            published_at: record.published_at,
        })
    }

    /// Publish a draft, stamping the current time
    pub fn publish(&mut self) -> Result<(), DomainError> {
        self.publish_at(Timestamp::now())
    }

    /// Publish a draft with an explicit publication time
    pub fn publish_at(&mut self, at: Timestamp) -> Result<(), DomainError> {
        if !self.status.can_transition_to(Status::Published) {
            return Err(DomainError::AlreadyPublished);
        }

        self.status = Status::Published;
        self.published_at = Some(at);
        Ok(())
    }

    /// Retire a published post. The publication timestamp is kept.
    pub fn archive(&mut self) -> Result<(), DomainError> {
        match self.status {
            Status::Published => {
                self.status = Status::Archived;
                Ok(())
            }
            Status::Draft => Err(DomainError::NotPublished),
            Status::Archived => Err(DomainError::AlreadyArchived),
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn published_at(&self) -> Option<&Timestamp> {
        self.published_at.as_ref()
    }

    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }
}
