use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::ApiResponse;
use crate::auth::RequestContext;
use crate::config::SessionConfig;
use crate::error::AppError;
use crate::features::FeatureState;

use super::commands::{LoginCommand, LogoutCommand};

pub fn sessions_routes() -> Router<FeatureState> {
    Router::new().route("/", post(login).delete(logout))
}

#[tracing::instrument(skip(pool, session, command), fields(username = %command.username))]
async fn login(
    State(pool): State<PgPool>,
    State(session): State<SessionConfig>,
    Json(mut command): Json<LoginCommand>,
) -> Result<Response, AppError> {
    command.ttl = session.ttl();

    let response = super::commands::login::handle(pool, command).await?;
    Ok(ApiResponse::created(response))
}

/// Needs a session but no CSRF token
#[tracing::instrument(skip(pool, ctx))]
async fn logout(State(pool): State<PgPool>, ctx: RequestContext) -> Result<Response, AppError> {
    let session_id = ctx.require_session()?;

    let response = super::commands::logout::handle(pool, LogoutCommand { session_id }).await?;
    Ok(ApiResponse::success(response).into_response())
}
