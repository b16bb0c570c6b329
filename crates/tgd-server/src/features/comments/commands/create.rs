use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::features::shared::error_helpers::map_foreign_key_violation;
use crate::features::shared::validation::{validate_comment, CommentValidationError};

/// Comment on a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentCommand {
    #[serde(skip_deserializing)]
    pub actor_id: i64,
    #[serde(skip_deserializing)]
    pub dataset_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CreateCommentResponse {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub dataset_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateCommentError {
    #[error(transparent)]
    Content(#[from] CommentValidationError),
    #[error("Dataset {0} not found")]
    DatasetNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateCommentResponse, CreateCommentError>> for CreateCommentCommand {}

impl crate::cqrs::middleware::Command for CreateCommentCommand {}

impl From<CreateCommentError> for AppError {
    fn from(err: CreateCommentError) -> Self {
        match err {
            CreateCommentError::Content(e) => AppError::Validation(e.to_string()),
            CreateCommentError::DatasetNotFound(_) => AppError::NotFound(err.to_string()),
            CreateCommentError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(actor_id = command.actor_id, dataset_id = command.dataset_id))]
pub async fn handle(
    pool: PgPool,
    command: CreateCommentCommand,
) -> Result<CreateCommentResponse, CreateCommentError> {
    let content = validate_comment(&command.content)?;

    let comment = sqlx::query_as::<_, CreateCommentResponse>(
        r#"
        INSERT INTO comments (content, user_id, dataset_id)
        VALUES ($1, $2, $3)
        RETURNING id, content, created_at, user_id, dataset_id
        "#,
    )
    .bind(&content)
    .bind(command.actor_id)
    .bind(command.dataset_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            CreateCommentError::DatasetNotFound(command.dataset_id),
            CreateCommentError::Database,
        )
    })?;

    tracing::info!(comment_id = comment.id, "Comment created");
    Ok(comment)
}
