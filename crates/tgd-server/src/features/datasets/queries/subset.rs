//! Filtered view of a dataset

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tgd_common::filter::LineFilter;

use crate::error::AppError;
use crate::features::datasets::types::{DatasetRecord, DatasetStats, LineRecord};

/// Limit applied when the request names none
pub const DEFAULT_SUBSET_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetViewQuery {
    pub id: i64,
    pub filter: LineFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetViewResponse {
    pub dataset: DatasetRecord,
    pub lines: Vec<LineRecord>,
    /// Statistics over the whole dataset, not just the returned lines
    pub stats: DatasetStats,
    pub filter: LineFilter,
    pub description: String,
    pub returned: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SubsetViewError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<SubsetViewResponse, SubsetViewError>> for SubsetViewQuery {}

impl crate::cqrs::middleware::Query for SubsetViewQuery {}

impl From<SubsetViewError> for AppError {
    fn from(err: SubsetViewError) -> Self {
        match err {
            SubsetViewError::NotFound(_) => AppError::NotFound(err.to_string()),
            SubsetViewError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, query), fields(id = query.id, filter = %query.filter.describe()))]
pub async fn handle(
    pool: PgPool,
    query: SubsetViewQuery,
) -> Result<SubsetViewResponse, SubsetViewError> {
    let dataset = super::get::fetch(&pool, query.id)
        .await?
        .ok_or(SubsetViewError::NotFound(query.id))?;

    let lines = super::filtered::fetch(&pool, dataset.id, &query.filter).await?;
    let stats = super::stats::fetch(&pool, dataset.id).await?;

    Ok(SubsetViewResponse {
        dataset,
        returned: lines.len(),
        lines,
        stats,
        description: query.filter.describe(),
        filter: query.filter,
    })
}
