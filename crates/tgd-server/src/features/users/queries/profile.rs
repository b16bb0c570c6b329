use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;
use crate::features::users::types::{UserDatasetItem, UserRecord, UserStatistics};

/// User, datasets and statistics for a profile page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileQuery {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user: UserRecord,
    pub datasets: Vec<UserDatasetItem>,
    pub statistics: UserStatistics,
}

#[derive(Debug, thiserror::Error)]
pub enum UserProfileError {
    #[error("User {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<UserProfileResponse, UserProfileError>> for UserProfileQuery {}

impl crate::cqrs::middleware::Query for UserProfileQuery {}

impl From<UserProfileError> for AppError {
    fn from(err: UserProfileError) -> Self {
        match err {
            UserProfileError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserProfileError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: UserProfileQuery,
) -> Result<UserProfileResponse, UserProfileError> {
    let user = super::get::fetch(&pool, query.user_id)
        .await?
        .ok_or(UserProfileError::NotFound(query.user_id))?;
    let datasets = super::datasets::fetch(&pool, user.id).await?;
    let statistics = super::statistics::fetch(&pool, user.id)
        .await?
        .ok_or(UserProfileError::NotFound(user.id))?;

    Ok(UserProfileResponse {
        user,
        datasets,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_profile(pool: PgPool) -> sqlx::Result<()> {
        let alice = TestUser::new("alice").insert(&pool).await?;
        TestDataset::new(&alice, "Words").with_lines(&["a", "b"]).insert(&pool).await?;

        let profile = handle(pool.clone(), UserProfileQuery { user_id: alice.id })
            .await
            .unwrap();
        assert_eq!(profile.user.username, "alice");
        assert_eq!(profile.datasets.len(), 1);
        assert_eq!(profile.statistics.line_count, 2);

        let missing = handle(pool.clone(), UserProfileQuery { user_id: alice.id + 1 }).await;
        assert!(matches!(missing, Err(UserProfileError::NotFound(_))));
        Ok(())
    }
}
