//! Persistence type adapters
//!
//! One `StorageAdapter` impl per value object maps it to the primitive the
//! SeaORM models store, and back. Repositories call these while building
//! active models and decoding rows, so nothing above this module ever sees
//! a raw column value.
//!
//! For every value `v` built through its public constructor,
//! `V::from_storage(v.to_storage()) == Ok(v)`.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use thiserror::Error;

use crate::domain::value_objects::{
    CommentId, Content, Email, Identifier, PostId, Role, Status, Timestamp, Title, UserId,
};
use crate::error::{DomainError, RepositoryError, ValidationError};

/// Bidirectional conversion between a value object and its column value
pub trait StorageAdapter: Sized {
    type Primitive;

    fn to_storage(&self) -> Self::Primitive;

    fn from_storage(primitive: Self::Primitive) -> Result<Self, ValidationError>;
}

/// `None` stores as `NULL`
pub fn to_storage_opt<T: StorageAdapter>(value: Option<&T>) -> Option<T::Primitive> {
    value.map(StorageAdapter::to_storage)
}

/// `NULL` loads as `None`
pub fn from_storage_opt<T: StorageAdapter>(
    primitive: Option<T::Primitive>,
) -> Result<Option<T>, ValidationError> {
    primitive.map(T::from_storage).transpose()
}

impl StorageAdapter for Identifier {
    type Primitive = String;

    fn to_storage(&self) -> String {
        self.to_string()
    }

    fn from_storage(primitive: String) -> Result<Self, ValidationError> {
        Identifier::from_string(&primitive)
    }
}

/// `$render` produces the canonical text form that `from_string` accepts
macro_rules! string_adapter {
    ($render:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl StorageAdapter for $ty {
                type Primitive = String;

                fn to_storage(&self) -> String {
                    String::from(self.$render())
                }

                fn from_storage(primitive: String) -> Result<Self, ValidationError> {
                    <$ty>::from_string(&primitive)
                }
            }
        )+
    };
}

string_adapter!(to_string: PostId, UserId, CommentId);
string_adapter!(as_str: Title, Content, Email, Status, Role);

impl StorageAdapter for Timestamp {
    type Primitive = DateTimeWithTimeZone;

    fn to_storage(&self) -> DateTimeWithTimeZone {
        self.as_datetime().fixed_offset()
    }

    fn from_storage(primitive: DateTimeWithTimeZone) -> Result<Self, ValidationError> {
        Ok(Timestamp::from_datetime(primitive.with_timezone(&Utc)))
    }
}

/// Why a stored row could not be turned back into a domain object
#[derive(Debug, Error)]
pub enum RowDecodeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RowDecodeError {
    pub fn for_row(self, entity: &'static str, id: String) -> RepositoryError {
        RepositoryError::Corrupt {
            entity,
            id,
            reason: self.to_string(),
        }
    }
}
