use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

/// Number of comments written by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountCommentsByUserQuery {
    pub user_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CountCommentsByUserError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<i64, CountCommentsByUserError>> for CountCommentsByUserQuery {}

impl crate::cqrs::middleware::Query for CountCommentsByUserQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: CountCommentsByUserQuery,
) -> Result<i64, CountCommentsByUserError> {
    Ok(count(&pool, query.user_id).await?)
}

pub(crate) async fn count<'e, E>(executor: E, user_id: i64) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(executor)
        .await
}
