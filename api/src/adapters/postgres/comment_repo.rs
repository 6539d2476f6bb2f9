//! PostgreSQL adapter for CommentRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::db_err;
use super::value_types::{RowDecodeError, StorageAdapter};
use crate::domain::entities::Comment;
use crate::domain::ports::CommentRepository;
use crate::domain::value_objects::{CommentId, Content, PostId, Timestamp, UserId};
use crate::entity::comments;
use crate::error::RepositoryError;

/// PostgreSQL implementation of CommentRepository
pub struct PostgresCommentRepository {
    db: DatabaseConnection,
}

impl PostgresCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(comment: &Comment) -> comments::ActiveModel {
    comments::ActiveModel {
        id: Set(comment.id().to_storage()),
        content: Set(comment.content().to_storage()),
        post_id: Set(comment.post_id().to_storage()),
        author_id: Set(comment.author_id().to_storage()),
        created_at: Set(comment.created_at().to_storage()),
    }
}

fn decode(model: comments::Model) -> Result<Comment, RowDecodeError> {
    Ok(Comment::restore(
        CommentId::from_storage(model.id)?,
        Content::from_storage(model.content)?,
        PostId::from_storage(model.post_id)?,
        UserId::from_storage(model.author_id)?,
        Timestamp::from_storage(model.created_at)?,
    ))
}

impl TryFrom<comments::Model> for Comment {
    type Error = RepositoryError;

    fn try_from(model: comments::Model) -> Result<Self, Self::Error> {
        let id = model.id.clone();
        decode(model).map_err(|e| e.for_row("comment", id))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), RepositoryError> {
        comments::Entity::insert(to_active_model(comment))
            .on_conflict(
                OnConflict::column(comments::Column::Id)
                    .update_column(comments::Column::Content)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        let result = comments::Entity::find_by_id(id.to_storage())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        result.map(Comment::try_from).transpose()
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError> {
        comments::Entity::find()
            .filter(comments::Column::PostId.eq(post_id.to_storage()))
            .order_by_asc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Comment::try_from)
            .collect()
    }

    async fn delete(&self, comment: &Comment) -> Result<(), RepositoryError> {
        comments::Entity::delete_by_id(comment.id().to_storage())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
