//! Plain-text export of a dataset's filtered lines

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tgd_common::filter::LineFilter;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadDatasetQuery {
    pub id: i64,
    pub filter: LineFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadDatasetResponse {
    pub filename: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadDatasetError {
    #[error("Dataset {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DownloadDatasetResponse, DownloadDatasetError>> for DownloadDatasetQuery {}

impl crate::cqrs::middleware::Query for DownloadDatasetQuery {}

impl From<DownloadDatasetError> for AppError {
    fn from(err: DownloadDatasetError) -> Self {
        match err {
            DownloadDatasetError::NotFound(_) => AppError::NotFound(err.to_string()),
            DownloadDatasetError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, query), fields(id = query.id, filter = %query.filter.describe()))]
pub async fn handle(
    pool: PgPool,
    query: DownloadDatasetQuery,
) -> Result<DownloadDatasetResponse, DownloadDatasetError> {
    let dataset = super::get::fetch(&pool, query.id)
        .await?
        .ok_or(DownloadDatasetError::NotFound(query.id))?;

    let lines = super::filtered::fetch(&pool, dataset.id, &query.filter).await?;
    let body = lines
        .iter()
        .map(|line| line.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    tracing::info!(lines = lines.len(), bytes = body.len(), "Prepared dataset download");

    Ok(DownloadDatasetResponse {
        filename: query.filter.download_filename(&dataset.title),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;
    use tgd_common::filter::LengthBucket;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_download_body_and_filename(pool: PgPool) -> sqlx::Result<()> {
        let alice = TestUser::new("alice").insert(&pool).await?;
        let dataset = TestDataset::new(&alice, "Programming Terms")
            .with_lines(&["npm", "Hello World!", "variable_name_1"])
            .insert(&pool)
            .await?;

        let all = handle(
            pool.clone(),
            DownloadDatasetQuery {
                id: dataset.id,
                filter: LineFilter::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(all.body, "npm\nHello World!\nvariable_name_1");
        assert_eq!(all.filename, "Programming_Terms.txt");

        let filter = LineFilter::default()
            .with_no_special_chars(true)
            .with_length(Some(LengthBucket::Short));
        let clean = handle(pool.clone(), DownloadDatasetQuery { id: dataset.id, filter })
            .await
            .unwrap();
        assert_eq!(clean.body, "npm\nvariable_name_1");
        assert_eq!(clean.filename, "Programming_Terms_clean_short.txt");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_download_of_empty_dataset(pool: PgPool) -> sqlx::Result<()> {
        let alice = TestUser::new("alice").insert(&pool).await?;
        let dataset = TestDataset::new(&alice, "Empty").insert(&pool).await?;

        let download = handle(
            pool.clone(),
            DownloadDatasetQuery {
                id: dataset.id,
                filter: LineFilter::default(),
            },
        )
        .await
        .unwrap();
        assert!(download.body.is_empty());
        Ok(())
    }
}
