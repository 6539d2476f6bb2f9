//! Opaque identifiers
//!
//! Canonical form is the 36 character hyphenated lowercase UUID
//! (`8-4-4-4-12` hex digits).

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::ValidationError;

/// Length of the canonical textual form
pub const IDENTIFIER_LEN: usize = 36;

const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Randomly generated opaque token, compared by its canonical text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse and validate a canonical identifier.
    ///
    /// Only the hyphenated layout is accepted; braced, URN and simple
    /// forms are rejected even though `uuid` could parse them.
    pub fn from_string(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::Identifier(value.to_string());

        if value.len() != IDENTIFIER_LEN {
            return Err(invalid());
        }

        let well_formed = value.char_indices().all(|(i, c)| {
            if HYPHEN_POSITIONS.contains(&i) {
                c == '-'
            } else {
                c.is_ascii_hexdigit()
            }
        });
        if !well_formed {
            return Err(invalid());
        }

        Uuid::parse_str(value).map(Self).map_err(|_| invalid())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Identifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Declares an aggregate-specific identifier wrapping [`Identifier`], so a
/// post id can never be handed to something expecting a user id.
macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Identifier);

        impl $name {
            pub fn generate() -> Self {
                Self(Identifier::generate())
            }

            pub fn from_string(value: &str) -> Result<Self, ValidationError> {
                Identifier::from_string(value).map(Self)
            }
        }

        impl From<Identifier> for $name {
            fn from(id: Identifier) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_string(s)
            }
        }
    };
}

typed_id!(
    /// Identifier of a [`Post`](crate::domain::entities::Post)
    PostId
);
typed_id!(
    /// Identifier of a [`User`](crate::domain::entities::User)
    UserId
);
typed_id!(
    /// Identifier of a [`Comment`](crate::domain::entities::Comment)
    CommentId
);
