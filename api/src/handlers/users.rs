//! User handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::CreatedResponse;
use crate::app::{ChangePassword, DeleteUser, GetUser, ListUsers, RegisterUser};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::AppState;

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// `user` or `admin`, defaults to `user`
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Public view of a user. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            created_at: user.created_at().to_string(),
        }
    }
}

/// POST /users
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state
        .dispatcher
        .execute(RegisterUser {
            email: request.email,
            password: request.password,
            role: request.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.dispatcher.ask(ListUsers).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.dispatcher.ask(GetUser { user_id }).await?;
    Ok(Json(user.into()))
}

/// PUT /users/:id/password
pub async fn change_password(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    state
        .dispatcher
        .execute(ChangePassword {
            user_id,
            current_password: request.current_password,
            new_password: request.new_password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/:id
///
/// Refused with 409 while the user still authors posts.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.dispatcher.execute(DeleteUser { user_id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
