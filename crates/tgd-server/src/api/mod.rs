//! HTTP surface: the versioned API plus health endpoints

pub mod response;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;

use crate::api::response::ApiResponse;
use crate::config::Config;
use crate::db;
use crate::error::AppError;
use crate::features::{self, FeatureState};
use crate::middleware;

/// Complete application router: `/`, `/health` and everything under `/api/v1`
pub fn router(pool: PgPool, config: &Config) -> Router {
    let feature_state = FeatureState {
        db: pool.clone(),
        session: config.session,
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(pool)
        .nest("/api/v1", features::router(feature_state))
        // Innermost first
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "TGD Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Pings the database
#[tracing::instrument(skip(pool))]
async fn health(State(pool): State<PgPool>) -> Result<Response, AppError> {
    db::health_check(&pool).await?;
    Ok(ApiResponse::success(json!({ "status": "ok" })).into_response())
}
