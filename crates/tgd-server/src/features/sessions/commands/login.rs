//! Login command
//!
//! Verifies credentials and opens a server-side session. The bearer token is
//! returned to the client once; only its digest is stored.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use tgd_common::checksum::token_digest;
use uuid::Uuid;

use crate::auth::tokens::{generate_csrf_token, generate_session_token};
use crate::error::AppError;
use crate::features::users::queries::check_login::{self, CheckLoginError, CheckLoginQuery};

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
    /// Session lifetime, taken from configuration
    #[serde(skip, default = "default_ttl")]
    pub ttl: chrono::Duration,
}

fn default_ttl() -> chrono::Duration {
    crate::config::SessionConfig::default().ttl()
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub token: String,
    pub csrf_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    CheckLogin(#[from] CheckLoginError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<LoginResponse, LoginError>> for LoginCommand {}

impl crate::cqrs::middleware::Command for LoginCommand {}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            LoginError::CheckLogin(e) => e.into(),
            LoginError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, command: LoginCommand) -> Result<LoginResponse, LoginError> {
    let user_id = check_login::handle(
        pool.clone(),
        CheckLoginQuery {
            username: command.username,
            password: command.password,
        },
    )
    .await?
    .ok_or(LoginError::InvalidCredentials)?;

    let purged = purge_expired(&pool).await?;
    if purged > 0 {
        tracing::debug!(purged, "Expired sessions removed");
    }

    let token = generate_session_token();
    let csrf_token = generate_csrf_token();
    let expires_at = Utc::now() + command.ttl;

    sqlx::query(
        r#"
        INSERT INTO sessions (id, user_id, token_hash, csrf_token, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(token_digest(&token))
    .bind(&csrf_token)
    .bind(expires_at)
    .execute(&pool)
    .await?;

    tracing::info!(user_id, "Session opened");

    Ok(LoginResponse {
        user_id,
        token,
        csrf_token,
        expires_at,
    })
}

/// Delete every session past its expiry
pub(crate) async fn purge_expired<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
