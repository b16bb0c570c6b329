use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use tgd_common::filter::LineFilter;

use crate::features::datasets::sql::filtered_lines_query;
use crate::features::datasets::types::LineRecord;

/// Lines of a dataset matching a filter bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredLinesQuery {
    pub dataset_id: i64,
    pub filter: LineFilter,
}

#[derive(Debug, thiserror::Error)]
pub enum FilteredLinesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<LineRecord>, FilteredLinesError>> for FilteredLinesQuery {}

impl crate::cqrs::middleware::Query for FilteredLinesQuery {}

#[tracing::instrument(skip(pool, query), fields(dataset_id = query.dataset_id, filter = %query.filter.describe()))]
pub async fn handle(
    pool: PgPool,
    query: FilteredLinesQuery,
) -> Result<Vec<LineRecord>, FilteredLinesError> {
    let lines = fetch(&pool, query.dataset_id, &query.filter).await?;
    tracing::debug!(count = lines.len(), "Filtered lines");
    Ok(lines)
}

pub(crate) async fn fetch<'e, E>(
    executor: E,
    dataset_id: i64,
    filter: &LineFilter,
) -> Result<Vec<LineRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let mut builder = filtered_lines_query(dataset_id, filter);
    builder.build_query_as::<LineRecord>().fetch_all(executor).await
}
