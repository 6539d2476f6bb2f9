//! In-memory implementations of the repository ports
//!
//! They store entities in memory and honour the same ordering contract as
//! the PostgreSQL adapters, so handler tests can run without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Comment, Post, User};
use crate::domain::ports::{CommentRepository, PostRepository, UserRepository};
use crate::domain::value_objects::{CommentId, Email, PostId, Status, UserId};
use crate::error::RepositoryError;

/// Entity plus the order in which it was first saved, used to break
/// timestamp ties deterministically
struct Stored<T> {
    seq: u64,
    entity: T,
}

struct Table<K, T> {
    rows: HashMap<K, Stored<T>>,
    next_seq: u64,
}

impl<K, T> Default for Table<K, T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: std::hash::Hash + Eq, T: Clone> Table<K, T> {
    fn upsert(&mut self, key: K, entity: T) {
        if let Some(row) = self.rows.get_mut(&key) {
            row.entity = entity;
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(key, Stored { seq, entity });
    }

    fn get(&self, key: &K) -> Option<T> {
        self.rows.get(key).map(|row| row.entity.clone())
    }

    /// Rows matching `keep`, sorted by `order` then insertion order
    fn select<O: Ord>(
        &self,
        keep: impl Fn(&T) -> bool,
        order: impl Fn(&T) -> O,
        newest_first: bool,
    ) -> Vec<T> {
        let mut rows: Vec<&Stored<T>> = self.rows.values().filter(|r| keep(&r.entity)).collect();
        rows.sort_by(|a, b| {
            order(&a.entity)
                .cmp(&order(&b.entity))
                .then(a.seq.cmp(&b.seq))
        });
        if newest_first {
            rows.reverse();
        }
        rows.into_iter().map(|r| r.entity.clone()).collect()
    }
}

// ============================================================================
// In-Memory Post Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Table<PostId, Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a post for testing
    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().upsert(*post.id(), post);
        self
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(&self, post: &Post) -> Result<(), RepositoryError> {
        self.posts.write().unwrap().upsert(*post.id(), post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        Ok(self.posts.read().unwrap().get(id))
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepositoryError> {
        Ok(self
            .posts
            .read()
            .unwrap()
            .select(|_| true, |p| *p.created_at(), true))
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepositoryError> {
        Ok(self.posts.read().unwrap().select(
            |p| p.status() == Status::Published,
            |p| p.published_at().copied(),
            true,
        ))
    }

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        Ok(self.posts.read().unwrap().select(
            |p| p.author_id() == author_id,
            |p| *p.created_at(),
            true,
        ))
    }

    async fn delete(&self, post: &Post) -> Result<(), RepositoryError> {
        self.posts.write().unwrap().rows.remove(post.id());
        Ok(())
    }
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Table<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().upsert(*user.id(), user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().unwrap();
        let taken = users
            .rows
            .values()
            .any(|row| row.entity.email() == user.email() && row.entity.id() != user.id());
        if taken {
            return Err(RepositoryError::UniqueViolation(format!(
                "email {} already stored",
                user.email()
            )));
        }
        users.upsert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().unwrap().get(id))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .select(|u| u.email() == email, |u| *u.created_at(), false)
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .select(|_| true, |u| *u.created_at(), false))
    }

    async fn delete(&self, user: &User) -> Result<(), RepositoryError> {
        self.users.write().unwrap().rows.remove(user.id());
        Ok(())
    }
}

// ============================================================================
// In-Memory Comment Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Table<CommentId, Comment>>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.comments
            .write()
            .unwrap()
            .upsert(*comment.id(), comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        Ok(self.comments.read().unwrap().get(id))
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError> {
        Ok(self.comments.read().unwrap().select(
            |c| c.post_id() == post_id,
            |c| *c.created_at(),
            false,
        ))
    }

    async fn delete(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.comments.write().unwrap().rows.remove(comment.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Role;
    use crate::test_utils::{test_comment, test_draft_post, test_published_post, test_user};

    #[tokio::test]
    async fn save_then_find_reflects_latest_state() {
        let repo = InMemoryPostRepository::new();
        let mut post = test_draft_post();
        repo.save(&post).await.unwrap();

        post.publish().unwrap();
        repo.save(&post).await.unwrap();

        let found = repo.find_by_id(post.id()).await.unwrap().unwrap();
        assert_eq!(found, post);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_then_find_is_absent() {
        let post = test_draft_post();
        let repo = InMemoryPostRepository::new().with_post(post.clone());

        repo.delete(&post).await.unwrap();
        repo.delete(&post).await.unwrap();

        assert!(repo.find_by_id(post.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn posts_list_newest_first() {
        let repo = InMemoryPostRepository::new();
        let older = test_draft_post();
        let newer = test_published_post();
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all[0].id(), newer.id());
        assert_eq!(all[1].id(), older.id());

        let published = repo.find_published().await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].id(), newer.id());
    }

    #[tokio::test]
    async fn find_user_by_email() {
        let user = test_user();
        let repo = InMemoryUserRepository::new().with_user(user.clone());

        assert_eq!(repo.find_by_email(user.email()).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn second_user_with_same_email_is_rejected() {
        let user = test_user();
        let repo = InMemoryUserRepository::new().with_user(user.clone());
        let twin = User::register(
            UserId::generate(),
            user.email().clone(),
            "salt$hash".to_string(),
            Role::User,
        );

        let err = repo.save(&twin).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueViolation(_)));
        // Re-saving the original row is still an update
        repo.save(&user).await.unwrap();
    }

    #[tokio::test]
    async fn comments_listed_oldest_first() {
        let repo = InMemoryCommentRepository::new();
        let post = test_draft_post();
        let author = test_user();
        let first = test_comment(post.id(), author.id());
        let second = test_comment(post.id(), author.id());
        let elsewhere = test_comment(&PostId::generate(), author.id());
        for c in [&first, &second, &elsewhere] {
            repo.save(c).await.unwrap();
        }

        let listed = repo.find_by_post(post.id()).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|c| *c.id()).collect();
        assert_eq!(ids, vec![*first.id(), *second.id()]);
    }
}
