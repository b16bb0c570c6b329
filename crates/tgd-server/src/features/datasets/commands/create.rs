//! Create dataset command
//!
//! Inserts the dataset row and its tag assignments in one transaction. The
//! actor becomes the permanent owner.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::features::shared::error_helpers::map_foreign_key_violation;
use crate::features::shared::validation::{
    validate_description, validate_title, DescriptionValidationError, TitleValidationError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetCommand {
    /// Filled in from the session, never from the request body
    #[serde(skip_deserializing)]
    pub actor_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CreateDatasetResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateDatasetError {
    #[error(transparent)]
    Title(#[from] TitleValidationError),
    #[error(transparent)]
    Description(#[from] DescriptionValidationError),
    #[error("Unknown tag id {0}")]
    UnknownTag(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateDatasetResponse, CreateDatasetError>> for CreateDatasetCommand {}

impl crate::cqrs::middleware::Command for CreateDatasetCommand {}

impl From<CreateDatasetError> for AppError {
    fn from(err: CreateDatasetError) -> Self {
        match err {
            CreateDatasetError::Database(e) => AppError::Database(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl CreateDatasetCommand {
    /// Trimmed title and normalized description
    pub fn validate(&self) -> Result<(String, String), CreateDatasetError> {
        let title = validate_title(&self.title)?;
        let description = validate_description(self.description.as_deref())?;
        Ok((title, description))
    }
}

#[tracing::instrument(skip(pool, command), fields(actor_id = command.actor_id))]
pub async fn handle(
    pool: PgPool,
    command: CreateDatasetCommand,
) -> Result<CreateDatasetResponse, CreateDatasetError> {
    let (title, description) = command.validate()?;

    let mut tx = pool.begin().await?;

    let dataset = sqlx::query_as::<_, CreateDatasetResponse>(
        r#"
        INSERT INTO datasets (title, description, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, description, user_id, created_at
        "#,
    )
    .bind(&title)
    .bind(&description)
    .bind(command.actor_id)
    .fetch_one(&mut *tx)
    .await?;

    for &tag_id in &command.tag_ids {
        sqlx::query(
            "INSERT INTO dataset_tags (dataset_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(dataset.id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, CreateDatasetError::UnknownTag(tag_id), CreateDatasetError::Database)
        })?;
    }

    tx.commit().await?;

    tracing::info!(dataset_id = dataset.id, tags = command.tag_ids.len(), "Dataset created");
    Ok(dataset)
}
