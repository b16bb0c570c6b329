use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;
use crate::features::datasets::types::TagRecord;

/// The whole tag vocabulary, alphabetically
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTagsQuery;

#[derive(Debug, thiserror::Error)]
pub enum ListTagsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<TagRecord>, ListTagsError>> for ListTagsQuery {}

impl crate::cqrs::middleware::Query for ListTagsQuery {}

impl From<ListTagsError> for AppError {
    fn from(err: ListTagsError) -> Self {
        match err {
            ListTagsError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, _query: ListTagsQuery) -> Result<Vec<TagRecord>, ListTagsError> {
    let tags = sqlx::query_as::<_, TagRecord>("SELECT id, name FROM tags ORDER BY name")
        .fetch_all(&pool)
        .await?;
    Ok(tags)
}
