use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::features::users::types::UserDatasetItem;

/// A user's datasets, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDatasetsQuery {
    pub user_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum UserDatasetsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<UserDatasetItem>, UserDatasetsError>> for UserDatasetsQuery {}

impl crate::cqrs::middleware::Query for UserDatasetsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: UserDatasetsQuery,
) -> Result<Vec<UserDatasetItem>, UserDatasetsError> {
    Ok(fetch(&pool, query.user_id).await?)
}

pub(crate) async fn fetch<'e, E>(executor: E, user_id: i64) -> Result<Vec<UserDatasetItem>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, UserDatasetItem>(
        r#"
        SELECT d.id, d.title, d.created_at, COUNT(l.id) AS line_count
        FROM datasets d
        LEFT JOIN dataset_lines l ON l.dataset_id = d.id
        WHERE d.user_id = $1
        GROUP BY d.id
        ORDER BY d.created_at DESC, d.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
