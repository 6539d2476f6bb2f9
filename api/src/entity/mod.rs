//! SeaORM table models
//!
//! Columns hold primitives only. Conversion to and from value objects
//! lives in `adapters::postgres::value_types`.

pub mod comments;
pub mod posts;
pub mod users;
