//! TGD Server Library
//!
//! HTTP API for curating, tagging and browsing line-oriented text datasets.
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)**
//! layout:
//!
//! - **Commands** (write operations) create, update or delete state and are
//!   served by POST, PUT and DELETE routes. Every command that touches a
//!   dataset or comment goes through [`auth::authorize`].
//! - **Queries** (read operations) are served by GET routes and never need a
//!   session.
//!
//! Requests carry their identity explicitly as an [`auth::RequestContext`]
//! extracted from the `Authorization` and `X-CSRF-Token` headers.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: PostgreSQL access with runtime-checked queries
//! - **Tower**: middleware (tracing, CORS, compression)
//!
//! # Example
//!
//! ```no_run
//! use tgd_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!     let app = api::router(pool, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

pub use error::{ApiResult, AppError};
