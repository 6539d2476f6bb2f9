//! Application layer
//!
//! Use cases expressed as Command/Query request types, one handler per
//! type, routed by the [`Dispatcher`]. Handlers never call each other;
//! callers compose use cases by dispatching several requests.

pub mod comments;
pub mod dispatcher;
pub mod password;
pub mod posts;
pub mod users;

use std::sync::Arc;

pub use comments::{AddComment, DeleteComment, ListComments};
pub use dispatcher::Dispatcher;
pub use posts::{
    ArchivePost, CreatePost, DeletePost, GetPost, ListPosts, ListPostsByAuthor,
    ListPublishedPosts, PublishPost,
};
pub use users::{ChangePassword, DeleteUser, GetUser, ListUsers, RegisterUser};

use comments::CommentHandlers;
use posts::PostHandlers;
use users::UserHandlers;

use crate::domain::ports::{CommentRepository, PostRepository, UserRepository};
use crate::error::DispatchError;

/// Wire every use case to its handler.
///
/// Fails if a request type ends up with zero or two handlers, so a wiring
/// mistake stops the process at startup rather than on first request.
pub fn build_dispatcher<PR, UR, CR>(
    posts: Arc<PR>,
    users: Arc<UR>,
    comments: Arc<CR>,
) -> Result<Dispatcher, DispatchError>
where
    PR: PostRepository + 'static,
    UR: UserRepository + 'static,
    CR: CommentRepository + 'static,
{
    let post_handlers = PostHandlers::new(posts.clone(), users.clone(), comments.clone());
    let user_handlers = UserHandlers::new(users.clone(), posts.clone());
    let comment_handlers = CommentHandlers::new(comments, posts, users);

    let builder = Dispatcher::builder()
        // Posts
        .register_command::<CreatePost, _>(post_handlers.clone())?
        .register_command::<PublishPost, _>(post_handlers.clone())?
        .register_command::<ArchivePost, _>(post_handlers.clone())?
        .register_command::<DeletePost, _>(post_handlers.clone())?
        .register_query::<GetPost, _>(post_handlers.clone())?
        .register_query::<ListPosts, _>(post_handlers.clone())?
        .register_query::<ListPublishedPosts, _>(post_handlers.clone())?
        .register_query::<ListPostsByAuthor, _>(post_handlers)?
        // Users
        .register_command::<RegisterUser, _>(user_handlers.clone())?
        .register_command::<ChangePassword, _>(user_handlers.clone())?
        .register_command::<DeleteUser, _>(user_handlers.clone())?
        .register_query::<GetUser, _>(user_handlers.clone())?
        .register_query::<ListUsers, _>(user_handlers)?
        // Comments
        .register_command::<AddComment, _>(comment_handlers.clone())?
        .register_command::<DeleteComment, _>(comment_handlers.clone())?
        .register_query::<ListComments, _>(comment_handlers)?;

    let builder = builder
        .require::<CreatePost>()?
        .require::<PublishPost>()?
        .require::<GetPost>()?
        .require::<ListPosts>()?
        .require::<RegisterUser>()?
        .require::<AddComment>()?;

    let dispatcher = builder.build();
    tracing::info!(handlers = dispatcher.len(), "Dispatcher ready");
    Ok(dispatcher)
}
