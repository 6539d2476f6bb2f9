//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::db_err;
use super::value_types::{RowDecodeError, StorageAdapter};
use crate::domain::entities::User;
use crate::domain::ports::UserRepository;
use crate::domain::value_objects::{Email, Role, Timestamp, UserId};
use crate::entity::users;
use crate::error::RepositoryError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id().to_storage()),
        email: Set(user.email().to_storage()),
        password_hash: Set(user.password_hash().to_string()),
        role: Set(user.role().to_storage()),
        created_at: Set(user.created_at().to_storage()),
    }
}

fn decode(model: users::Model) -> Result<User, RowDecodeError> {
    Ok(User::restore(
        UserId::from_storage(model.id)?,
        Email::from_storage(model.email)?,
        model.password_hash,
        Role::from_storage(model.role)?,
        Timestamp::from_storage(model.created_at)?,
    ))
}

impl TryFrom<users::Model> for User {
    type Error = RepositoryError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        let id = model.id.clone();
        decode(model).map_err(|e| e.for_row("user", id))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        users::Entity::insert(to_active_model(user))
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .update_columns([
                        users::Column::Email,
                        users::Column::PasswordHash,
                        users::Column::Role,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let result = users::Entity::find_by_id(id.to_storage())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let result = users::Entity::find()
            .filter(users::Column::Email.eq(email.to_storage()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        result.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn delete(&self, user: &User) -> Result<(), RepositoryError> {
        users::Entity::delete_by_id(user.id().to_storage())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
