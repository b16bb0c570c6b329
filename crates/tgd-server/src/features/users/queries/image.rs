use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;

/// Raw JPEG bytes of a user's profile image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetImageQuery {
    pub user_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetImageError {
    #[error("No image for user {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<u8>, GetImageError>> for GetImageQuery {}

impl crate::cqrs::middleware::Query for GetImageQuery {}

impl From<GetImageError> for AppError {
    fn from(err: GetImageError) -> Self {
        match err {
            GetImageError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetImageError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetImageQuery) -> Result<Vec<u8>, GetImageError> {
    let image: Option<Option<Vec<u8>>> = sqlx::query_scalar("SELECT image FROM users WHERE id = $1")
        .bind(query.user_id)
        .fetch_optional(&pool)
        .await?;

    image.flatten().ok_or(GetImageError::NotFound(query.user_id))
}
