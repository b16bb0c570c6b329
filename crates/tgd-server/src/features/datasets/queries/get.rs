use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::error::AppError;
use crate::features::datasets::sql::DATASET_COLUMNS;
use crate::features::datasets::types::DatasetRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDatasetQuery {
    pub id: i64,
}

pub type GetDatasetResponse = DatasetRecord;

#[derive(Debug, thiserror::Error)]
pub enum GetDatasetError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetDatasetResponse, GetDatasetError>> for GetDatasetQuery {}

impl crate::cqrs::middleware::Query for GetDatasetQuery {}

impl From<GetDatasetError> for AppError {
    fn from(err: GetDatasetError) -> Self {
        match err {
            GetDatasetError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetDatasetError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetDatasetQuery,
) -> Result<GetDatasetResponse, GetDatasetError> {
    fetch(&pool, query.id)
        .await?
        .ok_or(GetDatasetError::NotFound(query.id))
}

/// Dataset with owner username, if it exists
pub(crate) async fn fetch<'e, E>(executor: E, id: i64) -> Result<Option<DatasetRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, DatasetRecord>(&format!(
        "SELECT {} FROM datasets d JOIN users u ON u.id = d.user_id WHERE d.id = $1",
        DATASET_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Owner of a dataset, locking the row for the rest of the transaction
pub(crate) async fn lock_owner<'e, E>(executor: E, id: i64) -> Result<Option<i64>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT user_id FROM datasets WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Whether a dataset exists
pub(crate) async fn exists<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM datasets WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await
}
