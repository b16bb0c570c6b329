//! Feature modules implementing the TGD API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes, following the CQRS (Command Query Responsibility Segregation)
//! pattern.
//!
//! # Features
//!
//! - **datasets**: dataset CRUD, lines, filtered subsets, statistics, tags, search
//! - **comments**: comments on datasets
//! - **users**: registration, profiles, images, activity statistics
//! - **sessions**: login and logout
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list, search)
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Shared row types (if needed)
//!
//! Commands and queries implement the mediator pattern using the `mediator`
//! crate; see [`crate::cqrs::build_mediator`].

pub mod comments;
pub mod datasets;
pub mod sessions;
pub mod shared;
pub mod users;

use axum::{extract::FromRef, Router};
use sqlx::PgPool;

use crate::config::SessionConfig;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub db: PgPool,
    /// Lifetime of sessions issued at login
    pub session: SessionConfig,
}

impl FromRef<FeatureState> for PgPool {
    fn from_ref(state: &FeatureState) -> Self {
        state.db.clone()
    }
}

impl FromRef<FeatureState> for SessionConfig {
    fn from_ref(state: &FeatureState) -> Self {
        state.session
    }
}

/// Creates the API router with all feature routes mounted
///
/// - `/datasets` - datasets, their lines, subsets, downloads, tags and comments
/// - `/comments` - comment deletion
/// - `/tags` - the tag vocabulary
/// - `/search` - keyword search over datasets
/// - `/users` - registration, profiles and images
/// - `/sessions` - login and logout
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest(
            "/datasets",
            datasets::datasets_routes().merge(comments::dataset_comments_routes()),
        )
        .nest("/comments", comments::comments_routes())
        .nest("/tags", datasets::tags_routes())
        .nest("/search", datasets::search_routes())
        .nest("/users", users::users_routes())
        .nest("/sessions", sessions::sessions_routes())
        .with_state(state)
}
