//! Paginated dataset listing, newest first

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::features::shared::pagination::{
    offset, resolve_page, PageResolution, Paginated, PaginationMetadata, DATASETS_PER_PAGE,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDatasetsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DatasetListItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub line_count: i64,
    /// Time of the most recent line addition, if any
    pub last_added_at: Option<DateTime<Utc>>,
}

pub type ListDatasetsResponse = Paginated<DatasetListItem>;

#[derive(Debug, thiserror::Error)]
pub enum ListDatasetsError {
    #[error("Page {requested} is out of range; use page {redirect_to}")]
    PageOutOfRange { requested: i64, redirect_to: i64 },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListDatasetsResponse, ListDatasetsError>> for ListDatasetsQuery {}

impl crate::cqrs::middleware::Query for ListDatasetsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListDatasetsQuery,
) -> Result<ListDatasetsResponse, ListDatasetsError> {
    let total = super::count::count(&pool).await?;

    let page = match resolve_page(query.page, total, DATASETS_PER_PAGE) {
        PageResolution::Page(page) => page,
        PageResolution::Redirect(redirect_to) => {
            return Err(ListDatasetsError::PageOutOfRange {
                requested: query.page.unwrap_or(1),
                redirect_to,
            });
        },
    };

    let items = sqlx::query_as::<_, DatasetListItem>(
        r#"
        SELECT d.id, d.title, d.description, d.user_id, u.username, d.created_at,
               COUNT(l.id) AS line_count,
               MAX(l.added_at) AS last_added_at
        FROM datasets d
        JOIN users u ON u.id = d.user_id
        LEFT JOIN dataset_lines l ON l.dataset_id = d.id
        GROUP BY d.id, u.id
        ORDER BY d.id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(DATASETS_PER_PAGE)
    .bind(offset(page, DATASETS_PER_PAGE))
    .fetch_all(&pool)
    .await?;

    tracing::debug!(page, total, count = items.len(), "Listed datasets");

    Ok(Paginated::new(
        items,
        PaginationMetadata::new(page, DATASETS_PER_PAGE, total),
    ))
}
