//! Append lines to a dataset
//!
//! The submitted text is split on newlines; each line is trimmed and empty
//! lines are skipped. All inserts share one transaction.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{authorize, Action, AuthError, Owners};
use crate::error::AppError;
use crate::features::datasets::queries::get;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLinesCommand {
    #[serde(skip_deserializing)]
    pub actor_id: i64,
    #[serde(skip_deserializing)]
    pub dataset_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLinesResponse {
    pub dataset_id: i64,
    pub added: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AddLinesError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Forbidden(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<AddLinesResponse, AddLinesError>> for AddLinesCommand {}

impl crate::cqrs::middleware::Command for AddLinesCommand {}

impl From<AddLinesError> for AppError {
    fn from(err: AddLinesError) -> Self {
        match err {
            AddLinesError::NotFound(_) => AppError::NotFound(err.to_string()),
            AddLinesError::Forbidden(e) => e.into(),
            AddLinesError::Database(e) => AppError::Database(e),
        }
    }
}

/// Non-empty trimmed lines of `content`
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[tracing::instrument(skip(pool, command), fields(actor_id = command.actor_id, dataset_id = command.dataset_id))]
pub async fn handle(pool: PgPool, command: AddLinesCommand) -> Result<AddLinesResponse, AddLinesError> {
    let lines = split_lines(&command.content);

    let mut tx = pool.begin().await?;

    let owner = get::lock_owner(&mut *tx, command.dataset_id)
        .await?
        .ok_or(AddLinesError::NotFound(command.dataset_id))?;
    authorize(command.actor_id, Action::AppendLines, &Owners::dataset(owner))?;

    for line in &lines {
        sqlx::query("INSERT INTO dataset_lines (content, user_id, dataset_id) VALUES ($1, $2, $3)")
            .bind(line)
            .bind(command.actor_id)
            .bind(command.dataset_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(added = lines.len(), "Lines appended");
    Ok(AddLinesResponse {
        dataset_id: command.dataset_id,
        added: lines.len(),
    })
}
