use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;
use crate::features::shared::validation::{validate_image, ImageValidationError};

/// Replace the actor's profile image
#[derive(Clone, Serialize, Deserialize)]
pub struct UpdateImageCommand {
    pub actor_id: i64,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UpdateImageCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateImageCommand")
            .field("actor_id", &self.actor_id)
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateImageResponse {
    pub user_id: i64,
    pub size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateImageError {
    #[error(transparent)]
    Invalid(#[from] ImageValidationError),
    #[error("User {0} not found")]
    UserNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UpdateImageResponse, UpdateImageError>> for UpdateImageCommand {}

impl crate::cqrs::middleware::Command for UpdateImageCommand {}

impl From<UpdateImageError> for AppError {
    fn from(err: UpdateImageError) -> Self {
        match err {
            UpdateImageError::Invalid(e) => AppError::Validation(e.to_string()),
            UpdateImageError::UserNotFound(_) => AppError::NotFound(err.to_string()),
            UpdateImageError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: UpdateImageCommand,
) -> Result<UpdateImageResponse, UpdateImageError> {
    validate_image(&command.filename, &command.bytes)?;

    let updated = sqlx::query("UPDATE users SET image = $1 WHERE id = $2")
        .bind(&command.bytes)
        .bind(command.actor_id)
        .execute(&pool)
        .await?
        .rows_affected();
    if updated == 0 {
        return Err(UpdateImageError::UserNotFound(command.actor_id));
    }

    tracing::info!(size = command.bytes.len(), "Profile image updated");
    Ok(UpdateImageResponse {
        user_id: command.actor_id,
        size: command.bytes.len(),
    })
}
