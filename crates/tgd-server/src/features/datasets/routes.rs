use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::ApiResponse;
use crate::auth::RequestContext;
use crate::error::AppError;
use crate::features::FeatureState;

use super::{
    commands::{
        AddDatasetTagCommand, AddLinesCommand, CreateDatasetCommand, DeleteDatasetCommand,
        RemoveDatasetTagCommand, UpdateDatasetCommand,
    },
    queries::{
        DatasetDetailQuery, DownloadDatasetQuery, ListDatasetsError, ListDatasetsQuery,
        ListTagsQuery, SearchDatasetsQuery, SubsetViewQuery, DEFAULT_SUBSET_LIMIT,
    },
    types::FilterParams,
};

pub fn datasets_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_datasets).post(create_dataset))
        .route("/:id", get(get_dataset).put(update_dataset).delete(delete_dataset))
        .route("/:id/lines", post(add_lines))
        .route("/:id/subset", get(subset_view))
        .route("/:id/download", get(download_dataset))
        .route("/:id/tags", post(add_tag))
        .route("/:id/tags/:tag_id", delete(remove_tag))
}

pub fn tags_routes() -> Router<FeatureState> {
    Router::new().route("/", get(list_tags))
}

pub fn search_routes() -> Router<FeatureState> {
    Router::new().route("/", get(search_datasets))
}

/// Out-of-range pages redirect to the nearest valid page
#[tracing::instrument(skip(pool))]
async fn list_datasets(
    State(pool): State<PgPool>,
    Query(query): Query<ListDatasetsQuery>,
) -> Result<Response, AppError> {
    match super::queries::list::handle(pool, query).await {
        Ok(response) => Ok(ApiResponse::success(response).into_response()),
        Err(ListDatasetsError::PageOutOfRange { redirect_to, .. }) => {
            Ok(Redirect::to(&format!("/api/v1/datasets?page={}", redirect_to)).into_response())
        },
        Err(ListDatasetsError::Database(e)) => Err(AppError::Database(e)),
    }
}

#[tracing::instrument(skip(pool, ctx, command), fields(title = %command.title))]
async fn create_dataset(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Json(mut command): Json<CreateDatasetCommand>,
) -> Result<Response, AppError> {
    command.actor_id = ctx.require_csrf_user()?;

    let response = super::commands::create::handle(pool, command).await?;

    tracing::info!(dataset_id = response.id, "Dataset created via API");

    Ok(ApiResponse::created(response))
}

#[tracing::instrument(skip(pool))]
async fn get_dataset(State(pool): State<PgPool>, Path(id): Path<i64>) -> Result<Response, AppError> {
    let response = super::queries::detail::handle(pool, DatasetDetailQuery { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, ctx, command))]
async fn update_dataset(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateDatasetCommand>,
) -> Result<Response, AppError> {
    command.actor_id = ctx.require_csrf_user()?;
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, ctx))]
async fn delete_dataset(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let command = DeleteDatasetCommand {
        actor_id: ctx.require_csrf_user()?,
        id,
    };

    let response = super::commands::delete::handle(pool, command).await?;

    tracing::info!(dataset_id = id, "Dataset deleted via API");

    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, ctx, command))]
async fn add_lines(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    Json(mut command): Json<AddLinesCommand>,
) -> Result<Response, AppError> {
    command.actor_id = ctx.require_csrf_user()?;
    command.dataset_id = id;

    let response = super::commands::add_lines::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, params))]
async fn subset_view(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Query(params): Query<FilterParams>,
) -> Result<Response, AppError> {
    let filter = params.into_filter(Some(DEFAULT_SUBSET_LIMIT))?;

    let response = super::queries::subset::handle(pool, SubsetViewQuery { id, filter }).await?;
    Ok(ApiResponse::success(response).into_response())
}

/// Filtered lines as a `text/plain` attachment
#[tracing::instrument(skip(pool, params))]
async fn download_dataset(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Query(params): Query<FilterParams>,
) -> Result<Response, AppError> {
    let filter = params.into_filter(None)?;

    let response = super::queries::download::handle(pool, DownloadDatasetQuery { id, filter }).await?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", response.filename))
        .map_err(|e| AppError::Internal(format!("Invalid download filename: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        response.body,
    )
        .into_response())
}

#[tracing::instrument(skip(pool, ctx, command))]
async fn add_tag(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    Json(mut command): Json<AddDatasetTagCommand>,
) -> Result<Response, AppError> {
    command.actor_id = ctx.require_csrf_user()?;
    command.dataset_id = id;

    let response = super::commands::add_tag::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, ctx))]
async fn remove_tag(
    State(pool): State<PgPool>,
    ctx: RequestContext,
    Path((id, tag_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let command = RemoveDatasetTagCommand {
        actor_id: ctx.require_csrf_user()?,
        dataset_id: id,
        tag_id,
    };

    let response = super::commands::remove_tag::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn list_tags(State(pool): State<PgPool>) -> Result<Response, AppError> {
    let tags = super::queries::tags::handle(pool, ListTagsQuery).await?;
    Ok(ApiResponse::success(tags).into_response())
}

#[tracing::instrument(skip(pool))]
async fn search_datasets(
    State(pool): State<PgPool>,
    Query(query): Query<SearchDatasetsQuery>,
) -> Result<Response, AppError> {
    let results = super::queries::search::handle(pool, query).await?;

    tracing::debug!(count = results.len(), "Search via API");

    Ok(ApiResponse::success(results).into_response())
}
