use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::features::datasets::sql::stats_sql;
use crate::features::datasets::types::DatasetStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStatsQuery {
    pub dataset_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetStatsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DatasetStats, DatasetStatsError>> for DatasetStatsQuery {}

impl crate::cqrs::middleware::Query for DatasetStatsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: DatasetStatsQuery,
) -> Result<DatasetStats, DatasetStatsError> {
    Ok(fetch(&pool, query.dataset_id).await?)
}

pub(crate) async fn fetch<'e, E>(executor: E, dataset_id: i64) -> Result<DatasetStats, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, DatasetStats>(&stats_sql())
        .bind(dataset_id)
        .fetch_one(executor)
        .await
}
