//! Register user command
//!
//! Passwords are hashed with argon2id on the blocking pool before the insert.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::auth::password::{hash_password_blocking, PasswordError};
use crate::error::AppError;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{validate_registration, CredentialsValidationError};

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

impl std::fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RegisterUserResponse {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error(transparent)]
    Validation(#[from] CredentialsValidationError),
    #[error("Username already taken")]
    UsernameTaken,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<RegisterUserResponse, RegisterUserError>> for RegisterUserCommand {}

impl crate::cqrs::middleware::Command for RegisterUserCommand {}

impl From<RegisterUserError> for AppError {
    fn from(err: RegisterUserError) -> Self {
        match err {
            RegisterUserError::Validation(e) => AppError::Validation(e.to_string()),
            RegisterUserError::UsernameTaken => AppError::Conflict(err.to_string()),
            RegisterUserError::Password(e) => AppError::Internal(e.to_string()),
            RegisterUserError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: RegisterUserCommand,
) -> Result<RegisterUserResponse, RegisterUserError> {
    let username = validate_registration(
        &command.username,
        &command.password,
        &command.password_confirmation,
    )?;

    let password_hash = hash_password_blocking(command.password).await?;

    let user = sqlx::query_as::<_, RegisterUserResponse>(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id, username, created_at",
    )
    .bind(&username)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await
    .map_err(|e| map_unique_violation(e, RegisterUserError::UsernameTaken, RegisterUserError::Database))?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(username: &str, password: &str, confirmation: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            username: username.to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", command("alice", "hunter22", "hunter22"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter22"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_register_and_duplicate(pool: PgPool) -> sqlx::Result<()> {
        let created = handle(pool.clone(), command(" alice ", "pw", "pw")).await.unwrap();
        assert_eq!(created.username, "alice");

        let stored_hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
            .bind(created.id)
            .fetch_one(&pool)
            .await?;
        assert!(stored_hash.starts_with("$argon2id$"));

        let duplicate = handle(pool.clone(), command("alice", "other", "other")).await;
        assert!(matches!(duplicate, Err(RegisterUserError::UsernameTaken)));

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'alice'")
            .fetch_one(&pool)
            .await?;
        assert_eq!(users, 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_register_validation(pool: PgPool) -> sqlx::Result<()> {
        let mismatch = handle(pool.clone(), command("bob", "pw", "wp")).await;
        assert!(matches!(
            mismatch,
            Err(RegisterUserError::Validation(CredentialsValidationError::PasswordMismatch))
        ));
        Ok(())
    }
}
