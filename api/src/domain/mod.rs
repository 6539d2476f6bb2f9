//! Domain layer
//!
//! Contains pure business logic with no knowledge of storage or HTTP.
//! - `value_objects`: Self-validating primitives
//! - `entities`: Aggregates built from value objects
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
pub mod value_objects;
