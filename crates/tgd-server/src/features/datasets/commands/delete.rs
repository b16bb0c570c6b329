use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{authorize, Action, AuthError, Owners};
use crate::error::AppError;
use crate::features::datasets::queries::get;

/// Delete a dataset with its lines, comments and tag assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetCommand {
    pub actor_id: i64,
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDatasetResponse {
    pub id: i64,
    pub lines_deleted: u64,
    pub comments_deleted: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteDatasetError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Forbidden(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteDatasetResponse, DeleteDatasetError>> for DeleteDatasetCommand {}

impl crate::cqrs::middleware::Command for DeleteDatasetCommand {}

impl From<DeleteDatasetError> for AppError {
    fn from(err: DeleteDatasetError) -> Self {
        match err {
            DeleteDatasetError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteDatasetError::Forbidden(e) => e.into(),
            DeleteDatasetError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteDatasetCommand,
) -> Result<DeleteDatasetResponse, DeleteDatasetError> {
    let mut tx = pool.begin().await?;

    let owner = get::lock_owner(&mut *tx, command.id)
        .await?
        .ok_or(DeleteDatasetError::NotFound(command.id))?;
    authorize(command.actor_id, Action::DeleteDataset, &Owners::dataset(owner))?;

    // Explicit child deletes so their counts can be reported
    let lines_deleted = sqlx::query("DELETE FROM dataset_lines WHERE dataset_id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let comments_deleted = sqlx::query("DELETE FROM comments WHERE dataset_id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    sqlx::query("DELETE FROM dataset_tags WHERE dataset_id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM datasets WHERE id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(lines_deleted, comments_deleted, "Dataset deleted");
    Ok(DeleteDatasetResponse {
        id: command.id,
        lines_deleted,
        comments_deleted,
    })
}
