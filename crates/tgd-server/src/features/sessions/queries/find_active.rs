//! Session lookup by bearer token

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tgd_common::checksum::token_digest;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Clone, Serialize, Deserialize)]
pub struct FindActiveSessionQuery {
    pub token: String,
}

impl std::fmt::Debug for FindActiveSessionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FindActiveSessionQuery").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FindActiveSessionResponse {
    pub session_id: Uuid,
    pub user_id: i64,
    pub csrf_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FindActiveSessionError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Option<FindActiveSessionResponse>, FindActiveSessionError>>
    for FindActiveSessionQuery
{
}

impl crate::cqrs::middleware::Query for FindActiveSessionQuery {}

impl From<FindActiveSessionError> for AppError {
    fn from(err: FindActiveSessionError) -> Self {
        match err {
            FindActiveSessionError::Database(e) => AppError::Database(e),
        }
    }
}

/// Unexpired session for `token`, if any
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: FindActiveSessionQuery,
) -> Result<Option<FindActiveSessionResponse>, FindActiveSessionError> {
    let session = sqlx::query_as::<_, FindActiveSessionResponse>(
        r#"
        SELECT id AS session_id, user_id, csrf_token
        FROM sessions
        WHERE token_hash = $1 AND expires_at > NOW()
        "#,
    )
    .bind(token_digest(&query.token))
    .fetch_optional(&pool)
    .await?;

    Ok(session)
}
