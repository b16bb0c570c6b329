use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{authorize, Action, AuthError, Owners};
use crate::error::AppError;
use crate::features::datasets::queries::get;
use crate::features::datasets::types::DatasetRecord;
use crate::features::shared::validation::{
    validate_description, validate_title, DescriptionValidationError, TitleValidationError,
};

/// Replace a dataset's title and description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDatasetCommand {
    #[serde(skip_deserializing)]
    pub actor_id: i64,
    #[serde(skip_deserializing)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub type UpdateDatasetResponse = DatasetRecord;

#[derive(Debug, thiserror::Error)]
pub enum UpdateDatasetError {
    #[error(transparent)]
    Title(#[from] TitleValidationError),
    #[error(transparent)]
    Description(#[from] DescriptionValidationError),
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Forbidden(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UpdateDatasetResponse, UpdateDatasetError>> for UpdateDatasetCommand {}

impl crate::cqrs::middleware::Command for UpdateDatasetCommand {}

impl From<UpdateDatasetError> for AppError {
    fn from(err: UpdateDatasetError) -> Self {
        match err {
            UpdateDatasetError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateDatasetError::Forbidden(e) => e.into(),
            UpdateDatasetError::Database(e) => AppError::Database(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(actor_id = command.actor_id, id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateDatasetCommand,
) -> Result<UpdateDatasetResponse, UpdateDatasetError> {
    let mut tx = pool.begin().await?;

    let owner = get::lock_owner(&mut *tx, command.id)
        .await?
        .ok_or(UpdateDatasetError::NotFound(command.id))?;
    authorize(command.actor_id, Action::EditDataset, &Owners::dataset(owner))?;

    let title = validate_title(&command.title)?;
    let description = validate_description(command.description.as_deref())?;

    sqlx::query("UPDATE datasets SET title = $1, description = $2 WHERE id = $3")
        .bind(&title)
        .bind(&description)
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    let updated = get::fetch(&mut *tx, command.id)
        .await?
        .ok_or(UpdateDatasetError::NotFound(command.id))?;

    tx.commit().await?;

    tracing::info!("Dataset updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    fn command(actor_id: i64, id: i64, title: &str) -> UpdateDatasetCommand {
        UpdateDatasetCommand {
            actor_id,
            id,
            title: title.to_string(),
            description: Some("Updated".to_string()),
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_owner_updates(pool: PgPool) -> sqlx::Result<()> {
        let alice = TestUser::new("alice").insert(&pool).await?;
        let dataset = TestDataset::new(&alice, "Old").insert(&pool).await?;

        let updated = handle(pool.clone(), command(alice.id, dataset.id, " New "))
            .await
            .unwrap();
        assert_eq!(updated.title, " New ");
        assert_eq!(updated.description, "Updated");
        assert_eq!(updated.user_id, alice.id);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_non_owner_is_refused(pool: PgPool) -> sqlx::Result<()> {
        let alice = TestUser::new("alice").insert(&pool).await?;
        let mallory = TestUser::new("mallory").insert(&pool).await?;
        let dataset = TestDataset::new(&alice, "Old").insert(&pool).await?;

        let result = handle(pool.clone(), command(mallory.id, dataset.id, "Mine")).await;
        assert!(matches!(
            result,
            Err(UpdateDatasetError::Forbidden(AuthError::NotOwner))
        ));

        let title: String = sqlx::query_scalar("SELECT title FROM datasets WHERE id = $1")
            .bind(dataset.id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(title, "Old");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_non_owner_with_invalid_title_is_refused(pool: PgPool) -> sqlx::Result<()> {
        let alice = TestUser::new("alice").insert(&pool).await?;
        let mallory = TestUser::new("mallory").insert(&pool).await?;
        let dataset = TestDataset::new(&alice, "Old").insert(&pool).await?;

        let result = handle(pool.clone(), command(mallory.id, dataset.id, "")).await;
        assert!(matches!(
            result,
            Err(UpdateDatasetError::Forbidden(AuthError::NotOwner))
        ));

        let owner_result = handle(pool.clone(), command(alice.id, dataset.id, "  ")).await;
        assert!(matches!(
            owner_result,
            Err(UpdateDatasetError::Title(TitleValidationError::Required))
        ));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_missing_dataset(pool: PgPool) -> sqlx::Result<()> {
        let alice = TestUser::new("alice").insert(&pool).await?;
        let result = handle(pool.clone(), command(alice.id, 404, "New")).await;
        assert!(matches!(result, Err(UpdateDatasetError::NotFound(404))));
        Ok(())
    }
}
