//! Per-user activity statistics
//!
//! Line figures cover every line in the user's own datasets. Counts are
//! distinct because the dataset and line joins multiply rows.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};

use crate::error::AppError;
use crate::features::users::types::UserStatistics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatisticsQuery {
    pub user_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum UserStatisticsError {
    #[error("User {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UserStatistics, UserStatisticsError>> for UserStatisticsQuery {}

impl crate::cqrs::middleware::Query for UserStatisticsQuery {}

impl From<UserStatisticsError> for AppError {
    fn from(err: UserStatisticsError) -> Self {
        match err {
            UserStatisticsError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserStatisticsError::Database(e) => AppError::Database(e),
        }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    dataset_count: i64,
    line_count: i64,
    avg_lines_per_dataset: Option<f64>,
    first_dataset_at: Option<DateTime<Utc>>,
    last_line_added_at: Option<DateTime<Utc>>,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: UserStatisticsQuery,
) -> Result<UserStatistics, UserStatisticsError> {
    fetch(&pool, query.user_id)
        .await?
        .ok_or(UserStatisticsError::NotFound(query.user_id))
}

/// Statistics for `user_id`, or `None` when the user does not exist
pub(crate) async fn fetch<'e, E>(executor: E, user_id: i64) -> Result<Option<UserStatistics>, sqlx::Error>
where
    E: PgExecutor<'e> + Copy,
{
    let activity = sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT
            COUNT(DISTINCT d.id) AS dataset_count,
            COUNT(DISTINCT l.id) AS line_count,
            COUNT(DISTINCT l.id)::float8 / NULLIF(COUNT(DISTINCT d.id), 0) AS avg_lines_per_dataset,
            MIN(d.created_at) AS first_dataset_at,
            MAX(l.added_at) AS last_line_added_at
        FROM users u
        LEFT JOIN datasets d ON d.user_id = u.id
        LEFT JOIN dataset_lines l ON l.dataset_id = d.id
        WHERE u.id = $1
        GROUP BY u.id
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    let Some(activity) = activity else {
        return Ok(None);
    };

    let last_modified_dataset: Option<String> = sqlx::query_scalar(
        r#"
        SELECT d.title
        FROM dataset_lines l
        JOIN datasets d ON d.id = l.dataset_id
        WHERE d.user_id = $1
        ORDER BY l.added_at DESC, l.id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    let comment_count =
        crate::features::comments::queries::count_by_user::count(executor, user_id).await?;

    Ok(Some(UserStatistics {
        dataset_count: activity.dataset_count,
        line_count: activity.line_count,
        avg_lines_per_dataset: activity.avg_lines_per_dataset,
        first_dataset_at: activity.first_dataset_at,
        last_line_added_at: activity.last_line_added_at,
        last_modified_dataset,
        comment_count,
    }))
}
