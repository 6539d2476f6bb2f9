//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;
pub mod value_types;


use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Schema, SqlErr, Statement};

use crate::entity::{comments, posts, users};
use crate::error::RepositoryError;

pub use comment_repo::PostgresCommentRepository;
pub use post_repo::PostgresPostRepository;
pub use user_repo::PostgresUserRepository;

pub(crate) fn db_err(e: DbErr) -> RepositoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::UniqueViolation(detail),
        _ => RepositoryError::Database(e.to_string()),
    }
}

/// Create the blog tables and their secondary indexes from the entity
/// definitions if they are missing
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    for stmt in schema_statements(db.get_database_backend()) {
        db.execute(stmt).await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}

/// Tables first, then indexes, all guarded with `IF NOT EXISTS`
fn schema_statements(backend: DbBackend) -> Vec<Statement> {
    let schema = Schema::new(backend);
    let mut statements = Vec::new();

    for mut table in [
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(posts::Entity),
        schema.create_table_from_entity(comments::Entity),
    ] {
        table.if_not_exists();
        statements.push(backend.build(&table));
    }

    let indexes = [
        schema.create_index_from_entity(users::Entity),
        schema.create_index_from_entity(posts::Entity),
        schema.create_index_from_entity(comments::Entity),
    ];
    for mut index in indexes.into_iter().flatten() {
        index.if_not_exists();
        statements.push(backend.build(&index));
    }

    statements
}
