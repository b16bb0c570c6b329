use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{authorize, Action, AuthError, Owners};
use crate::error::AppError;
use crate::features::datasets::queries::get;

/// Remove a tag assignment from a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveDatasetTagCommand {
    pub actor_id: i64,
    pub dataset_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDatasetTagResponse {
    pub dataset_id: i64,
    pub tag_id: i64,
    /// False when the tag was not assigned
    pub removed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoveDatasetTagError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error("Tag {0} not found")]
    TagNotFound(i64),
    #[error(transparent)]
    Forbidden(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<RemoveDatasetTagResponse, RemoveDatasetTagError>> for RemoveDatasetTagCommand {}

impl crate::cqrs::middleware::Command for RemoveDatasetTagCommand {}

impl From<RemoveDatasetTagError> for AppError {
    fn from(err: RemoveDatasetTagError) -> Self {
        match err {
            RemoveDatasetTagError::NotFound(_) | RemoveDatasetTagError::TagNotFound(_) => {
                AppError::NotFound(err.to_string())
            },
            RemoveDatasetTagError::Forbidden(e) => e.into(),
            RemoveDatasetTagError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: RemoveDatasetTagCommand,
) -> Result<RemoveDatasetTagResponse, RemoveDatasetTagError> {
    let mut tx = pool.begin().await?;

    let owner = get::lock_owner(&mut *tx, command.dataset_id)
        .await?
        .ok_or(RemoveDatasetTagError::NotFound(command.dataset_id))?;
    authorize(command.actor_id, Action::TagDataset, &Owners::dataset(owner))?;

    let tag_exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tags WHERE id = $1)")
        .bind(command.tag_id)
        .fetch_one(&mut *tx)
        .await?;
    if !tag_exists {
        return Err(RemoveDatasetTagError::TagNotFound(command.tag_id));
    }

    let removed = sqlx::query("DELETE FROM dataset_tags WHERE dataset_id = $1 AND tag_id = $2")
        .bind(command.dataset_id)
        .bind(command.tag_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    Ok(RemoveDatasetTagResponse {
        dataset_id: command.dataset_id,
        tag_id: command.tag_id,
        removed: removed > 0,
    })
}
