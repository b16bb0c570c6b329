use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

/// End a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutCommand {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<LogoutResponse, LogoutError>> for LogoutCommand {}

impl crate::cqrs::middleware::Command for LogoutCommand {}

impl From<LogoutError> for AppError {
    fn from(err: LogoutError) -> Self {
        match err {
            LogoutError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, command: LogoutCommand) -> Result<LogoutResponse, LogoutError> {
    let deleted = sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(command.session_id)
        .execute(&pool)
        .await?
        .rows_affected();

    Ok(LogoutResponse {
        logged_out: deleted > 0,
    })
}
