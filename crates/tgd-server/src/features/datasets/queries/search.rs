//! Keyword search over dataset titles and descriptions

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;
use crate::features::datasets::sql::DATASET_COLUMNS;
use crate::features::datasets::types::DatasetRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchDatasetsQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchDatasetsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<DatasetRecord>, SearchDatasetsError>> for SearchDatasetsQuery {}

impl crate::cqrs::middleware::Query for SearchDatasetsQuery {}

impl From<SearchDatasetsError> for AppError {
    fn from(err: SearchDatasetsError) -> Self {
        match err {
            SearchDatasetsError::Database(e) => AppError::Database(e),
        }
    }
}

/// Escape `LIKE` metacharacters so the keyword matches literally
pub fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: SearchDatasetsQuery,
) -> Result<Vec<DatasetRecord>, SearchDatasetsError> {
    let keyword = query.query.trim();
    if keyword.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = format!("%{}%", escape_like(keyword));
    let results = sqlx::query_as::<_, DatasetRecord>(&format!(
        r#"
        SELECT {}
        FROM datasets d
        JOIN users u ON u.id = d.user_id
        WHERE d.title ILIKE $1 OR d.description ILIKE $1
        ORDER BY d.created_at DESC, d.id DESC
        "#,
        DATASET_COLUMNS
    ))
    .bind(pattern)
    .fetch_all(&pool)
    .await?;

    tracing::debug!(count = results.len(), "Search completed");
    Ok(results)
}
