use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::error::AppError;
use crate::features::comments::types::CommentView;
use crate::features::datasets::queries::get;

/// Comments on a dataset, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCommentsQuery {
    pub dataset_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListCommentsError {
    #[error("Dataset {0} not found")]
    DatasetNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<CommentView>, ListCommentsError>> for ListCommentsQuery {}

impl crate::cqrs::middleware::Query for ListCommentsQuery {}

impl From<ListCommentsError> for AppError {
    fn from(err: ListCommentsError) -> Self {
        match err {
            ListCommentsError::DatasetNotFound(_) => AppError::NotFound(err.to_string()),
            ListCommentsError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListCommentsQuery,
) -> Result<Vec<CommentView>, ListCommentsError> {
    if !get::exists(&pool, query.dataset_id).await? {
        return Err(ListCommentsError::DatasetNotFound(query.dataset_id));
    }
    Ok(fetch(&pool, query.dataset_id).await?)
}

pub(crate) async fn fetch<'e, E>(executor: E, dataset_id: i64) -> Result<Vec<CommentView>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CommentView>(
        r#"
        SELECT c.id, c.content, c.created_at, c.user_id, u.username, c.dataset_id
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.dataset_id = $1
        ORDER BY c.created_at DESC, c.id DESC
        "#,
    )
    .bind(dataset_id)
    .fetch_all(executor)
    .await
}
