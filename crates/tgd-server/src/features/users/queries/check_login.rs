use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::password::{verify_password_blocking, PasswordError};
use crate::error::AppError;

/// Resolve credentials to a user id
#[derive(Clone, Serialize, Deserialize)]
pub struct CheckLoginQuery {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CheckLoginQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckLoginQuery")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckLoginError {
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Option<i64>, CheckLoginError>> for CheckLoginQuery {}

impl crate::cqrs::middleware::Query for CheckLoginQuery {}

impl From<CheckLoginError> for AppError {
    fn from(err: CheckLoginError) -> Self {
        match err {
            CheckLoginError::Password(e) => AppError::Internal(e.to_string()),
            CheckLoginError::Database(e) => AppError::Database(e),
        }
    }
}

/// `None` for an unknown username or a wrong password
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: CheckLoginQuery) -> Result<Option<i64>, CheckLoginError> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT id, password_hash FROM users WHERE username = $1")
            .bind(query.username.trim())
            .fetch_optional(&pool)
            .await?;

    let Some((id, password_hash)) = row else {
        return Ok(None);
    };

    if verify_password_blocking(query.password, password_hash).await? {
        Ok(Some(id))
    } else {
        Ok(None)
    }
}
