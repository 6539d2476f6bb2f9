//! PostgreSQL adapter for PostRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::db_err;
use super::value_types::{from_storage_opt, to_storage_opt, RowDecodeError, StorageAdapter};
use crate::domain::entities::{Post, PostRecord};
use crate::domain::ports::PostRepository;
use crate::domain::value_objects::{Content, PostId, Status, Timestamp, Title, UserId};
use crate::entity::posts;
use crate::error::RepositoryError;

/// PostgreSQL implementation of PostRepository
pub struct PostgresPostRepository {
    db: DatabaseConnection,
}

impl PostgresPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(post: &Post) -> posts::ActiveModel {
    posts::ActiveModel {
        id: Set(post.id().to_storage()),
        title: Set(post.title().to_storage()),
        content: Set(post.content().to_storage()),
        status: Set(post.status().to_storage()),
        author_id: Set(post.author_id().to_storage()),
        created_at: Set(post.created_at().to_storage()),
        published_at: Set(to_storage_opt(post.published_at())),
    }
}

fn decode(model: posts::Model) -> Result<Post, RowDecodeError> {
    let record = PostRecord {
        id: PostId::from_storage(model.id)?,
        title: Title::from_storage(model.title)?,
        content: Content::from_storage(model.content)?,
        status: Status::from_storage(model.status)?,
        author_id: UserId::from_storage(model.author_id)?,
        created_at: Timestamp::from_storage(model.created_at)?,
        published_at: from_storage_opt(model.published_at)?,
    };
    Ok(Post::restore(record)?)
}

impl TryFrom<posts::Model> for Post {
    type Error = RepositoryError;

    fn try_from(model: posts::Model) -> Result<Self, Self::Error> {
        let id = model.id.clone();
        decode(model).map_err(|e| e.for_row("post", id))
    }
}

fn decode_all(models: Vec<posts::Model>) -> Result<Vec<Post>, RepositoryError> {
    models.into_iter().map(Post::try_from).collect()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn save(&self, post: &Post) -> Result<(), RepositoryError> {
        posts::Entity::insert(to_active_model(post))
            .on_conflict(
                OnConflict::column(posts::Column::Id)
                    .update_columns([
                        posts::Column::Title,
                        posts::Column::Content,
                        posts::Column::Status,
                        posts::Column::AuthorId,
                        posts::Column::PublishedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let result = posts::Entity::find_by_id(id.to_storage())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        result.map(Post::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let models = posts::Entity::find()
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        decode_all(models)
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepositoryError> {
        let models = posts::Entity::find()
            .filter(posts::Column::Status.eq(Status::Published.to_storage()))
            .order_by_desc(posts::Column::PublishedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        decode_all(models)
    }

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        let models = posts::Entity::find()
            .filter(posts::Column::AuthorId.eq(author_id.to_storage()))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        decode_all(models)
    }

    async fn delete(&self, post: &Post) -> Result<(), RepositoryError> {
        posts::Entity::delete_by_id(post.id().to_storage())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_draft_post, test_published_post};

    #[test]
    fn draft_row_has_null_published_at() {
        let post = test_draft_post();
        let model = to_active_model(&post);
        assert_eq!(model.published_at, Set(None));
        assert_eq!(model.status, Set("draft".to_string()));
    }

    fn as_model(post: &Post) -> posts::Model {
        posts::Model {
            id: post.id().to_storage(),
            title: post.title().to_storage(),
            content: post.content().to_storage(),
            status: post.status().to_storage(),
            author_id: post.author_id().to_storage(),
            created_at: post.created_at().to_storage(),
            published_at: to_storage_opt(post.published_at()),
        }
    }

    #[test]
    fn row_decodes_to_equal_post() {
        let post = test_published_post();
        assert_eq!(Post::try_from(as_model(&post)).unwrap(), post);
    }

    #[test]
    fn inconsistent_row_is_reported_as_corrupt() {
        let post = test_published_post();
        let mut model = as_model(&post);
        model.published_at = None;

        let err = Post::try_from(model).unwrap_err();
        match err {
            RepositoryError::Corrupt { entity, id, .. } => {
                assert_eq!(entity, "post");
                assert_eq!(id, post.id().to_string());
            }
            other => panic!("expected corrupt row, got {other:?}"),
        }
    }

    #[test]
    fn unknown_status_is_reported_as_corrupt() {
        let mut model = as_model(&test_draft_post());
        model.status = "deleted".to_string();
        assert!(matches!(
            Post::try_from(model),
            Err(RepositoryError::Corrupt { .. })
        ));
    }
}
