//! Per-request identity
//!
//! [`RequestContext`] is extracted from the `Authorization: Bearer <token>`
//! and `X-CSRF-Token` headers. A missing, unknown or expired token yields an
//! anonymous context rather than a rejection; handlers that need a user call
//! [`RequestContext::require_user`] and, for mutations,
//! [`RequestContext::verify_csrf`].

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use sqlx::PgPool;
use uuid::Uuid;

use super::{tokens::tokens_match, AuthError};
use crate::error::AppError;
use crate::features::sessions::queries::{FindActiveSessionQuery, FindActiveSessionResponse};

/// Header carrying the CSRF token issued at login
pub const CSRF_HEADER: &str = "x-csrf-token";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Option<i64>,
    pub session_id: Option<Uuid>,
    /// CSRF token bound to the session
    pub csrf_token: Option<String>,
    /// CSRF token sent with this request
    pub submitted_csrf: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated session
    pub fn for_session(session: FindActiveSessionResponse, submitted_csrf: Option<String>) -> Self {
        Self {
            user_id: Some(session.user_id),
            session_id: Some(session.session_id),
            csrf_token: Some(session.csrf_token),
            submitted_csrf,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn require_user(&self) -> Result<i64, AuthError> {
        self.user_id.ok_or(AuthError::NotLoggedIn)
    }

    pub fn require_session(&self) -> Result<Uuid, AuthError> {
        self.session_id.ok_or(AuthError::NotLoggedIn)
    }

    /// Both tokens must be present and equal
    pub fn verify_csrf(&self) -> Result<(), AuthError> {
        match (&self.csrf_token, &self.submitted_csrf) {
            (Some(expected), Some(submitted)) if tokens_match(expected, submitted) => Ok(()),
            _ => Err(AuthError::CsrfMismatch),
        }
    }

    /// Logged-in user for a state-changing request
    pub fn require_csrf_user(&self) -> Result<i64, AuthError> {
        let user_id = self.require_user()?;
        self.verify_csrf()?;
        Ok(user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    PgPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let submitted_csrf = header_value(&parts.headers, CSRF_HEADER);

        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(Self {
                submitted_csrf,
                ..Self::anonymous()
            });
        };

        let pool = PgPool::from_ref(state);
        let session = crate::features::sessions::queries::find_active::handle(
            pool,
            FindActiveSessionQuery { token },
        )
        .await?;

        Ok(match session {
            Some(session) => Self::for_session(session, submitted_csrf),
            None => {
                tracing::debug!("Unknown or expired session token");
                Self {
                    submitted_csrf,
                    ..Self::anonymous()
                }
            },
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = header_value(headers, header::AUTHORIZATION.as_str())?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
