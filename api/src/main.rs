//! Blog API Server
//!
//! A small blogging core (posts, users, comments) behind an HTTP surface.
//! Uses hexagonal (ports & adapters) architecture: handlers dispatch
//! Commands and Queries, handlers in `app` drive the domain through
//! repository ports, and `adapters` implement those ports on PostgreSQL.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    ensure_schema, PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
use app::Dispatcher;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router around a ready dispatcher
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Users
        .route(
            "/users",
            post(handlers::register_user).get(handlers::list_users),
        )
        .route(
            "/users/:id",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .route("/users/:id/password", put(handlers::change_password))
        // Posts
        .route("/posts", post(handlers::create_post).get(handlers::list_posts))
        .route(
            "/posts/:id",
            get(handlers::get_post).delete(handlers::delete_post),
        )
        .route("/posts/:id/publish", post(handlers::publish_post))
        .route("/posts/:id/archive", post(handlers::archive_post))
        // Comments
        .route(
            "/posts/:id/comments",
            post(handlers::add_comment).get(handlers::list_comments),
        )
        .route(
            "/posts/:id/comments/:comment_id",
            delete(handlers::delete_comment),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Blog API...");

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.auto_migrate {
        ensure_schema(&db)
            .await
            .context("Failed to create database schema")?;
    }

    // Create adapters
    let post_repo = Arc::new(PostgresPostRepository::new(db.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let comment_repo = Arc::new(PostgresCommentRepository::new(db));

    // Wire use cases; a missing handler stops startup here
    let dispatcher = app::build_dispatcher(post_repo, user_repo, comment_repo)
        .context("Failed to wire request handlers")?;

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };
    let app = build_router(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
