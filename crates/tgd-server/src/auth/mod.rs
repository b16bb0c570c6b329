//! Authentication and authorization
//!
//! - [`password`]: argon2id hashing and verification
//! - [`tokens`]: session bearer tokens and CSRF tokens
//! - [`context`]: the per-request [`RequestContext`] extractor
//! - [`policy`]: the single ownership decision, [`authorize`]
//!
//! Every failure in this module surfaces as `403 Forbidden` with the same
//! generic message. The precise reason is only logged.

pub mod context;
pub mod password;
pub mod policy;
pub mod tokens;

pub use context::{RequestContext, CSRF_HEADER};
pub use policy::{authorize, Action, Owners};

use thiserror::Error;

use crate::error::AppError;

/// Why a request was refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("No active session")]
    NotLoggedIn,

    #[error("CSRF token missing or mismatched")]
    CsrfMismatch,

    #[error("Actor does not own the resource")]
    NotOwner,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        tracing::debug!(reason = %err, "Request refused");
        AppError::Forbidden
    }
}
