//! Everything shown on a dataset page in one response

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;
use crate::features::comments::types::CommentView;
use crate::features::datasets::types::{DatasetRecord, DatasetStats, LineRecord, TagRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDetailQuery {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDetailResponse {
    pub dataset: DatasetRecord,
    pub lines: Vec<LineRecord>,
    pub stats: DatasetStats,
    pub tags: Vec<TagRecord>,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetDetailError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DatasetDetailResponse, DatasetDetailError>> for DatasetDetailQuery {}

impl crate::cqrs::middleware::Query for DatasetDetailQuery {}

impl From<DatasetDetailError> for AppError {
    fn from(err: DatasetDetailError) -> Self {
        match err {
            DatasetDetailError::NotFound(_) => AppError::NotFound(err.to_string()),
            DatasetDetailError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: DatasetDetailQuery,
) -> Result<DatasetDetailResponse, DatasetDetailError> {
    let dataset = super::get::fetch(&pool, query.id)
        .await?
        .ok_or(DatasetDetailError::NotFound(query.id))?;

    let lines = super::lines::fetch(&pool, dataset.id).await?;
    let stats = super::stats::fetch(&pool, dataset.id).await?;
    let tags = super::dataset_tags::fetch(&pool, dataset.id).await?;
    let comments = crate::features::comments::queries::list::fetch(&pool, dataset.id).await?;

    Ok(DatasetDetailResponse {
        dataset,
        lines,
        stats,
        tags,
        comments,
    })
}
