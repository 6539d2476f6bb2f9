//! Value objects
//!
//! Immutable, self-validating wrappers around primitives. Each exposes a
//! `from_string`-style smart constructor, a read accessor for the canonical
//! primitive, and structural equality. Fields are private to this module
//! tree so the only way in is through validation.

pub mod email;
pub mod identifier;
pub mod status;
pub mod text;
pub mod timestamp;

pub use email::Email;
pub use identifier::{CommentId, Identifier, PostId, UserId};
pub use status::{Role, Status};
pub use text::{Content, Title};
pub use timestamp::Timestamp;
