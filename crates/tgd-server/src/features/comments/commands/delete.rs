use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{authorize, Action, AuthError, Owners};
use crate::error::AppError;
use crate::features::comments::queries::get;

/// Delete a comment; allowed for its author and the dataset owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommentCommand {
    pub actor_id: i64,
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCommentResponse {
    pub id: i64,
    pub dataset_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteCommentError {
    #[error("Comment {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Forbidden(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteCommentResponse, DeleteCommentError>> for DeleteCommentCommand {}

impl crate::cqrs::middleware::Command for DeleteCommentCommand {}

impl From<DeleteCommentError> for AppError {
    fn from(err: DeleteCommentError) -> Self {
        match err {
            DeleteCommentError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteCommentError::Forbidden(e) => e.into(),
            DeleteCommentError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteCommentCommand,
) -> Result<DeleteCommentResponse, DeleteCommentError> {
    let mut tx = pool.begin().await?;

    let comment = get::fetch(&mut *tx, command.id)
        .await?
        .ok_or(DeleteCommentError::NotFound(command.id))?;
    authorize(
        command.actor_id,
        Action::DeleteComment,
        &Owners::comment(comment.dataset_owner_id, comment.user_id),
    )?;

    let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(DeleteCommentError::NotFound(command.id));
    }

    tx.commit().await?;

    tracing::info!("Comment deleted");
    Ok(DeleteCommentResponse {
        id: command.id,
        dataset_id: comment.dataset_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_author_and_dataset_owner_may_delete(pool: PgPool) -> sqlx::Result<()> {
        let owner = TestUser::new("owner").insert(&pool).await?;
        let author = TestUser::new("author").insert(&pool).await?;
        let dataset = TestDataset::new(&owner, "Words").insert(&pool).await?;
        let by_author = insert_comment(&pool, &author, &dataset, "one").await?;
        let removed_by_owner = insert_comment(&pool, &author, &dataset, "two").await?;

        handle(pool.clone(), DeleteCommentCommand { actor_id: author.id, id: by_author })
            .await
            .unwrap();
        handle(pool.clone(), DeleteCommentCommand { actor_id: owner.id, id: removed_by_owner })
            .await
            .unwrap();

        // Already gone
        let again = handle(pool.clone(), DeleteCommentCommand { actor_id: owner.id, id: by_author }).await;
        assert!(matches!(again, Err(DeleteCommentError::NotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_stranger_cannot_delete(pool: PgPool) -> sqlx::Result<()> {
        let owner = TestUser::new("owner").insert(&pool).await?;
        let author = TestUser::new("author").insert(&pool).await?;
        let stranger = TestUser::new("stranger").insert(&pool).await?;
        let dataset = TestDataset::new(&owner, "Words").insert(&pool).await?;
        let id = insert_comment(&pool, &author, &dataset, "stay").await?;

        let result = handle(pool.clone(), DeleteCommentCommand { actor_id: stranger.id, id }).await;
        assert!(matches!(result, Err(DeleteCommentError::Forbidden(AuthError::NotOwner))));

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&pool)
            .await?;
        assert_eq!(remaining, 1);
        Ok(())
    }
}
