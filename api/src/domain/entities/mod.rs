//! Domain entities
//!
//! Aggregates own their value objects and refer to each other by id only.
//! These are separate from the SeaORM models in the `entity` module.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::{Post, PostRecord};
pub use user::User;
