use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::ApiResponse;
use crate::auth::RequestContext;
use crate::error::AppError;
use crate::features::FeatureState;

use super::{
    commands::{CreateCommentCommand, DeleteCommentCommand},
    queries::ListCommentsQuery,
};

/// Routes under `/comments`
pub fn comments_routes() -> Router<FeatureState> {
    Router::new().route("/:id", delete(delete_comment))
}

/// Routes under `/datasets`, merged with the dataset routes
pub fn dataset_comments_routes() -> Router<FeatureState> {
    Router::new().route("/:id/comments", get(list_comments).post(create_comment))
}

#[tracing::instrument(skip(pool))]
async fn list_comments(State(pool): State<PgPool>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let comments = super::queries::list::handle(pool, ListCommentsQuery { dataset_id: id }).await?;
    Ok(ApiResponse::success(comments).into_response())
}

#[tracing::instrument(skip(pool, ctx, command))]
async fn create_comment(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    Json(mut command): Json<CreateCommentCommand>,
) -> Result<Response, AppError> {
    command.actor_id = ctx.require_csrf_user()?;
    command.dataset_id = id;

    let response = super::commands::create::handle(pool, command).await?;

    tracing::info!(comment_id = response.id, "Comment created via API");

    Ok(ApiResponse::created(response))
}

#[tracing::instrument(skip(pool, ctx))]
async fn delete_comment(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let command = DeleteCommentCommand {
        actor_id: ctx.require_csrf_user()?,
        id,
    };

    let response = super::commands::delete::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}
