//! User entity
//!
//! Users are referenced by posts and comments through their id only.

use crate::domain::value_objects::{Email, Role, Timestamp, UserId};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    /// Opaque; produced and checked outside the domain
    password_hash: String,
    role: Role,
    created_at: Timestamp,
}

impl User {
    pub fn register(id: UserId, email: Email, password_hash: String, role: Role) -> Self {
        Self {
            id,
            email,
            password_hash,
            role,
            created_at: Timestamp::now(),
        }
    }

    /// Rebuild a user from storage
    pub fn restore(
        id: UserId,
        email: Email,
        password_hash: String,
        role: Role,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            role,
            created_at,
        }
    }

    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
