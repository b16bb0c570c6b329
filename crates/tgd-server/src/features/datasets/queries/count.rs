use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountDatasetsQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDatasetsResponse {
    pub total: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CountDatasetsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CountDatasetsResponse, CountDatasetsError>> for CountDatasetsQuery {}

impl crate::cqrs::middleware::Query for CountDatasetsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    _query: CountDatasetsQuery,
) -> Result<CountDatasetsResponse, CountDatasetsError> {
    Ok(CountDatasetsResponse {
        total: count(&pool).await?,
    })
}

pub(crate) async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
        .fetch_one(executor)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_count(pool: PgPool) -> sqlx::Result<()> {
        assert_eq!(handle(pool.clone(), CountDatasetsQuery).await.unwrap().total, 0);

        let alice = TestUser::new("alice").insert(&pool).await?;
        TestDataset::new(&alice, "One").insert(&pool).await?;
        TestDataset::new(&alice, "Two").insert(&pool).await?;

        assert_eq!(handle(pool.clone(), CountDatasetsQuery).await.unwrap().total, 2);
        Ok(())
    }
}
