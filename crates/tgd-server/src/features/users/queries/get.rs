use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::error::AppError;
use crate::features::users::types::UserRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetUserError {
    #[error("User {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UserRecord, GetUserError>> for GetUserQuery {}

impl crate::cqrs::middleware::Query for GetUserQuery {}

impl From<GetUserError> for AppError {
    fn from(err: GetUserError) -> Self {
        match err {
            GetUserError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetUserError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetUserQuery) -> Result<UserRecord, GetUserError> {
    fetch(&pool, query.id)
        .await?
        .ok_or(GetUserError::NotFound(query.id))
}

pub(crate) async fn fetch<'e, E>(executor: E, id: i64) -> Result<Option<UserRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, image IS NOT NULL AS has_image, created_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
