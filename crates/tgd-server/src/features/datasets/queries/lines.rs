use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::features::datasets::sql::LINE_COLUMNS;
use crate::features::datasets::types::LineRecord;

/// Every line of a dataset in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLinesQuery {
    pub dataset_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListLinesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<LineRecord>, ListLinesError>> for ListLinesQuery {}

impl crate::cqrs::middleware::Query for ListLinesQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: ListLinesQuery) -> Result<Vec<LineRecord>, ListLinesError> {
    Ok(fetch(&pool, query.dataset_id).await?)
}

pub(crate) async fn fetch<'e, E>(executor: E, dataset_id: i64) -> Result<Vec<LineRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, LineRecord>(&format!(
        "SELECT {} FROM dataset_lines l JOIN users u ON u.id = l.user_id \
         WHERE l.dataset_id = $1 ORDER BY l.id",
        LINE_COLUMNS
    ))
    .bind(dataset_id)
    .fetch_all(executor)
    .await
}
