use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::features::datasets::types::TagRecord;

/// Tags assigned to one dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetTagsQuery {
    pub dataset_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetTagsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<TagRecord>, DatasetTagsError>> for DatasetTagsQuery {}

impl crate::cqrs::middleware::Query for DatasetTagsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: DatasetTagsQuery,
) -> Result<Vec<TagRecord>, DatasetTagsError> {
    Ok(fetch(&pool, query.dataset_id).await?)
}

pub(crate) async fn fetch<'e, E>(executor: E, dataset_id: i64) -> Result<Vec<TagRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, TagRecord>(
        r#"
        SELECT t.id, t.name
        FROM tags t
        JOIN dataset_tags dt ON dt.tag_id = t.id
        WHERE dt.dataset_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(dataset_id)
    .fetch_all(executor)
    .await
}
