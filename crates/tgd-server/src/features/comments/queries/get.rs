use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::error::AppError;
use crate::features::comments::types::CommentRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCommentQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetCommentError {
    #[error("Comment {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CommentRecord, GetCommentError>> for GetCommentQuery {}

impl crate::cqrs::middleware::Query for GetCommentQuery {}

impl From<GetCommentError> for AppError {
    fn from(err: GetCommentError) -> Self {
        match err {
            GetCommentError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetCommentError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetCommentQuery) -> Result<CommentRecord, GetCommentError> {
    fetch(&pool, query.id)
        .await?
        .ok_or(GetCommentError::NotFound(query.id))
}

/// Comment joined with its dataset's owner
pub(crate) async fn fetch<'e, E>(executor: E, id: i64) -> Result<Option<CommentRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT c.id, c.content, c.created_at, c.user_id, c.dataset_id,
               d.user_id AS dataset_owner_id
        FROM comments c
        JOIN datasets d ON d.id = c.dataset_id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
