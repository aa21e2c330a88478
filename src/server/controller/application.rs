use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        application::{
            ApplicationDto, ApplicationQueryDto, ApplicationStatsDto, ApplicationTrendDto,
            BulkDeleteApplicationsDto, BulkDeleteResultDto, BulkUpdateApplicationsDto,
            BulkUpdateResultDto, CreateApplicationDto, UpdateApplicationDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::application::{
            Application, ApplicationFilter, CreateApplicationParams, UpdateApplicationParams,
            MAX_ENTRIES,
        },
        service::application::{applications_csv, export_filename, ApplicationService},
        state::AppState,
        util::export::csv_attachment,
    },
};

/// Tag for grouping loan application endpoints in OpenAPI documentation
pub static APPLICATION_TAG: &str = "application";

#[derive(Deserialize, IntoParams)]
pub struct TrendParams {
    /// Number of days to look back, 1 to 365.
    #[serde(default = "default_trend_days")]
    pub days: i64,
}

fn default_trend_days() -> i64 {
    30
}

/// Lists applications with filtering and sorting.
///
/// # Access Control
/// - `view_loans`
///
/// # Returns
/// - `200 OK` - Page of applications
/// - `400 Bad Request` - Unsupported sort field or order, or `entries` above 100
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    params(ApplicationQueryDto),
    responses(
        (status = 200, description = "Page of applications", body = PaginatedDto<ApplicationDto>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_applications(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ApplicationQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let entries = query.entries.unwrap_or_else(super::default_entries);
    if entries == 0 || entries > MAX_ENTRIES {
        return Err(AppError::BadRequest(format!(
            "Entries must be between 1 and {}",
            MAX_ENTRIES
        )));
    }
    let filter = ApplicationFilter::from_query(&query).map_err(AppError::BadRequest)?;

    let applications = ApplicationService::new(&state.db)
        .get_paginated(&filter, query.page, entries)
        .await?;

    Ok((
        StatusCode::OK,
        Json(applications.into_dto(Application::into_dto)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application filed", body = ApplicationDto),
        (status = 400, description = "Invalid amounts or term", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Customer or branch not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_application(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateLoans])
        .await?;

    let application = ApplicationService::new(&state.db)
        .create(CreateApplicationParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(application.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/applications/{application_id}",
    tag = APPLICATION_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "The application", body = ApplicationDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let application = ApplicationService::new(&state.db)
        .get_by_id(application_id)
        .await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}

/// Edits an application. Setting `status` approves, rejects or cancels it and is
/// recorded against the current user.
///
/// # Access Control
/// - `create_loans`
/// - `approve_loans` as well when `status` is given
#[utoipa::path(
    put,
    path = "/api/applications/{application_id}",
    tag = APPLICATION_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    request_body = UpdateApplicationDto,
    responses(
        (status = 200, description = "Application updated", body = ApplicationDto),
        (status = 400, description = "Already processed, missing rejection reason or invalid amounts", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_application(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
    Json(payload): Json<UpdateApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let user = if payload.status.is_some() {
        guard
            .require(&[Permission::CreateLoans, Permission::ApproveLoans])
            .await?
    } else {
        guard.require(&[Permission::CreateLoans]).await?
    };

    let application = ApplicationService::new(&state.db)
        .update(
            application_id,
            UpdateApplicationParams::from_dto(payload),
            user.id,
        )
        .await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{application_id}",
    tag = APPLICATION_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 400, description = "Application already processed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_application(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateLoans])
        .await?;

    ApplicationService::new(&state.db)
        .delete(application_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Moves many pending applications to one status in a single database transaction.
///
/// # Access Control
/// - `approve_loans`
///
/// # Returns
/// - `200 OK` - Count of applications changed
/// - `400 Bad Request` - An application is already processed, or a rejection has no reason
/// - `404 Not Found` - None of the ids exist
#[utoipa::path(
    post,
    path = "/api/applications/bulk-update",
    tag = APPLICATION_TAG,
    request_body = BulkUpdateApplicationsDto,
    responses(
        (status = 200, description = "Applications updated", body = BulkUpdateResultDto),
        (status = 400, description = "Invalid status change", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "No applications found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn bulk_update_applications(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BulkUpdateApplicationsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ApproveLoans])
        .await?;

    let updated_count = ApplicationService::new(&state.db)
        .bulk_update(
            &payload.application_ids,
            payload.status,
            payload.rejection_reason,
            payload.notes,
            user.id,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(BulkUpdateResultDto {
            updated_count,
            message: format!("Successfully updated {} applications", updated_count),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/applications/bulk-delete",
    tag = APPLICATION_TAG,
    request_body = BulkDeleteApplicationsDto,
    responses(
        (status = 200, description = "Applications deleted", body = BulkDeleteResultDto),
        (status = 400, description = "Some applications are processed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "No applications found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn bulk_delete_applications(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BulkDeleteApplicationsDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateLoans])
        .await?;

    let deleted_count = ApplicationService::new(&state.db)
        .bulk_delete(&payload.application_ids)
        .await?;

    Ok((
        StatusCode::OK,
        Json(BulkDeleteResultDto {
            deleted_count,
            message: format!("Successfully deleted {} applications", deleted_count),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/applications/stats",
    tag = APPLICATION_TAG,
    responses(
        (status = 200, description = "Application statistics", body = ApplicationStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let stats = ApplicationService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}

#[utoipa::path(
    get,
    path = "/api/applications/trends",
    tag = APPLICATION_TAG,
    params(TrendParams),
    responses(
        (status = 200, description = "Daily totals, oldest first", body = Vec<ApplicationTrendDto>),
        (status = 400, description = "Days out of range", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application_trends(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TrendParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let trends = ApplicationService::new(&state.db)
        .trends(params.days)
        .await?;

    Ok((StatusCode::OK, Json(trends)))
}

/// Exports every application matching the filters, ignoring paging.
///
/// `format=csv` (default) downloads `applications_YYYYmmdd_HHMMSS.csv`;
/// `format=json` returns the list as JSON.
#[utoipa::path(
    get,
    path = "/api/applications/export",
    tag = APPLICATION_TAG,
    params(ApplicationQueryDto),
    responses(
        (status = 200, description = "CSV download or JSON list", body = Vec<ApplicationDto>),
        (status = 400, description = "Invalid query or format", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_applications(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ApplicationQueryDto>,
) -> Result<Response, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let filter = ApplicationFilter::from_query(&query).map_err(AppError::BadRequest)?;
    let format = query.format.as_deref().unwrap_or("csv");
    if format != "csv" && format != "json" {
        return Err(AppError::BadRequest(format!(
            "Invalid format: {}. Must be 'csv' or 'json'",
            format
        )));
    }

    let applications = ApplicationService::new(&state.db).get_all(&filter).await?;

    if format == "json" {
        let applications: Vec<ApplicationDto> =
            applications.into_iter().map(Application::into_dto).collect();
        return Ok((StatusCode::OK, Json(applications)).into_response());
    }

    let body = applications_csv(&applications)?;

    Ok(csv_attachment(&export_filename(), body))
}
