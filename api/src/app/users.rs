//! User use cases

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::dispatcher::{Command, Handler, Query, Request};
use crate::app::password::{hash_password, verify_password};
use crate::domain::entities::User;
use crate::domain::ports::{PostRepository, UserRepository};
use crate::domain::value_objects::{Email, Role, UserId};
use crate::error::{AppError, RepositoryError, ValidationError};

/// Create an account. `role` defaults to `user`.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl Request for RegisterUser {
    type Output = UserId;
    const NAME: &'static str = "RegisterUser";
}
impl Command for RegisterUser {}

/// Replace a user's password after checking the current one
#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub user_id: String,
    pub current_password: String,
    pub new_password: String,
}

impl Request for ChangePassword {
    type Output = ();
    const NAME: &'static str = "ChangePassword";
}
impl Command for ChangePassword {}

/// Remove an account that no longer authors any post. Missing users are
/// not an error.
#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub user_id: String,
}

impl Request for DeleteUser {
    type Output = ();
    const NAME: &'static str = "DeleteUser";
}
impl Command for DeleteUser {}

#[derive(Debug, Clone)]
pub struct GetUser {
    pub user_id: String,
}

impl Request for GetUser {
    type Output = User;
    const NAME: &'static str = "GetUser";
}
impl Query for GetUser {}

/// Every user, oldest first
#[derive(Debug, Clone, Default)]
pub struct ListUsers;

impl Request for ListUsers {
    type Output = Vec<User>;
    const NAME: &'static str = "ListUsers";
}
impl Query for ListUsers {}

/// Handles every user request type
pub struct UserHandlers<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    users: Arc<UR>,
    posts: Arc<PR>,
}

impl<UR, PR> Clone for UserHandlers<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            posts: self.posts.clone(),
        }
    }
}

impl<UR, PR> UserHandlers<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    pub fn new(users: Arc<UR>, posts: Arc<PR>) -> Self {
        Self { users, posts }
    }

    async fn load(&self, raw_id: &str) -> Result<User, AppError> {
        let id = UserId::from_string(raw_id)?;
        self.users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

fn require_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::Blank("Password"));
    }
    Ok(())
}

#[async_trait]
impl<UR: UserRepository, PR: PostRepository> Handler<RegisterUser> for UserHandlers<UR, PR> {
    async fn handle(&self, request: RegisterUser) -> Result<UserId, AppError> {
        let email = Email::from_string(&request.email)?;
        let role = match request.role.as_deref() {
            Some(raw) => Role::from_string(raw)?,
            None => Role::default(),
        };
        require_password(&request.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        let user = User::register(
            UserId::generate(),
            email,
            hash_password(&request.password),
            role,
        );
        // A concurrent registration can still win the race to the unique index
        match self.users.save(&user).await {
            Err(RepositoryError::UniqueViolation(_)) => {
                return Err(AppError::Conflict(format!(
                    "Email {} is already registered",
                    user.email()
                )));
            }
            other => other?,
        }

        tracing::info!(user_id = %user.id(), role = %user.role(), "User registered");
        Ok(*user.id())
    }
}

#[async_trait]
impl<UR: UserRepository, PR: PostRepository> Handler<ChangePassword> for UserHandlers<UR, PR> {
    async fn handle(&self, request: ChangePassword) -> Result<(), AppError> {
        let mut user = self.load(&request.user_id).await?;
        require_password(&request.new_password)?;

        if !verify_password(&request.current_password, user.password_hash()) {
            tracing::warn!(user_id = %user.id(), "Password change rejected");
            return Err(AppError::Unauthorized(
                "Current password does not match".to_string(),
            ));
        }

        user.change_password(hash_password(&request.new_password));
        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id(), "Password changed");
        Ok(())
    }
}

#[async_trait]
impl<UR: UserRepository, PR: PostRepository> Handler<DeleteUser> for UserHandlers<UR, PR> {
    async fn handle(&self, request: DeleteUser) -> Result<(), AppError> {
        let user_id = UserId::from_string(&request.user_id)?;
        let Some(user) = self.users.find_by_id(&user_id).await? else {
            tracing::debug!(user_id = %user_id, "User already absent, nothing to delete");
            return Ok(());
        };

        let authored = self.posts.find_by_author(&user_id).await?;
        if !authored.is_empty() {
            return Err(AppError::Conflict(format!(
                "User {} still authors {} post(s)",
                user_id,
                authored.len()
            )));
        }

        self.users.delete(&user).await?;
        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

#[async_trait]
impl<UR: UserRepository, PR: PostRepository> Handler<GetUser> for UserHandlers<UR, PR> {
    async fn handle(&self, request: GetUser) -> Result<User, AppError> {
        self.load(&request.user_id).await
    }
}

#[async_trait]
impl<UR: UserRepository, PR: PostRepository> Handler<ListUsers> for UserHandlers<UR, PR> {
    async fn handle(&self, _request: ListUsers) -> Result<Vec<User>, AppError> {
        Ok(self.users.find_all().await?)
    }
}
