use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{authorize, Action, AuthError, Owners};
use crate::error::AppError;
use crate::features::datasets::queries::get;
use crate::features::shared::error_helpers::map_foreign_key_violation;

/// Assign a tag to a dataset; assigning it twice is a no-op
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDatasetTagCommand {
    #[serde(skip_deserializing)]
    pub actor_id: i64,
    #[serde(skip_deserializing)]
    pub dataset_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDatasetTagResponse {
    pub dataset_id: i64,
    pub tag_id: i64,
    /// False when the tag was already assigned
    pub added: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AddDatasetTagError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error("Tag {0} not found")]
    TagNotFound(i64),
    #[error(transparent)]
    Forbidden(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<AddDatasetTagResponse, AddDatasetTagError>> for AddDatasetTagCommand {}

impl crate::cqrs::middleware::Command for AddDatasetTagCommand {}

impl From<AddDatasetTagError> for AppError {
    fn from(err: AddDatasetTagError) -> Self {
        match err {
            AddDatasetTagError::NotFound(_) | AddDatasetTagError::TagNotFound(_) => {
                AppError::NotFound(err.to_string())
            },
            AddDatasetTagError::Forbidden(e) => e.into(),
            AddDatasetTagError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: AddDatasetTagCommand,
) -> Result<AddDatasetTagResponse, AddDatasetTagError> {
    let mut tx = pool.begin().await?;

    let owner = get::lock_owner(&mut *tx, command.dataset_id)
        .await?
        .ok_or(AddDatasetTagError::NotFound(command.dataset_id))?;
    authorize(command.actor_id, Action::TagDataset, &Owners::dataset(owner))?;

    // The dataset row is locked, so a foreign key failure can only be the tag
    let inserted = sqlx::query(
        "INSERT INTO dataset_tags (dataset_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(command.dataset_id)
    .bind(command.tag_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            AddDatasetTagError::TagNotFound(command.tag_id),
            AddDatasetTagError::Database,
        )
    })?
    .rows_affected();

    tx.commit().await?;

    Ok(AddDatasetTagResponse {
        dataset_id: command.dataset_id,
        tag_id: command.tag_id,
        added: inserted > 0,
    })
}
