use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::ApiResponse;
use crate::auth::RequestContext;
use crate::error::AppError;
use crate::features::FeatureState;

use super::{
    commands::{RegisterUserCommand, UpdateImageCommand},
    queries::{GetImageQuery, UserProfileQuery},
};

/// Multipart field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

pub fn users_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", post(register_user))
        .route("/me/image", put(update_image))
        .route("/:id", get(get_profile))
        .route("/:id/image", get(get_image))
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
async fn register_user(
    State(pool): State<PgPool>,
    Json(command): Json<RegisterUserCommand>,
) -> Result<Response, AppError> {
    let response = super::commands::register::handle(pool, command).await?;

    tracing::info!(user_id = response.id, "User registered via API");

    Ok(ApiResponse::created(response))
}

#[tracing::instrument(skip(pool))]
async fn get_profile(State(pool): State<PgPool>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let response = super::queries::profile::handle(pool, UserProfileQuery { user_id: id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_image(State(pool): State<PgPool>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let bytes = super::queries::image::handle(pool, GetImageQuery { user_id: id }).await?;
    Ok(([(header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg"))], bytes).into_response())
}

#[tracing::instrument(skip(pool, ctx, multipart))]
async fn update_image(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let actor_id = ctx.require_csrf_user()?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e)))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Err(AppError::Validation(format!("Missing '{}' field", IMAGE_FIELD)));
    };

    let command = UpdateImageCommand {
        actor_id,
        filename,
        bytes,
    };
    let response = super::commands::update_image::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}
