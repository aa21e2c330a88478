use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, MessageDto, PaginatedDto},
        branch::{BranchDto, CreateBranchDto, UpdateBranchDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::branch::{Branch, BranchFilter, CreateBranchParams, UpdateBranchParams},
        service::branch::BranchService,
        state::AppState,
    },
};

/// Tag for grouping branch endpoints in OpenAPI documentation
pub static BRANCH_TAG: &str = "branch";

#[derive(Deserialize, IntoParams)]
pub struct BranchListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    pub is_active: Option<bool>,
    /// Matches branch name or city.
    pub search: Option<String>,
}

/// Lists branches ordered by name.
///
/// # Access Control
/// - `view_branches`
#[utoipa::path(
    get,
    path = "/api/branches",
    tag = BRANCH_TAG,
    params(BranchListParams),
    responses(
        (status = 200, description = "Page of branches", body = PaginatedDto<BranchDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_branches(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<BranchListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewBranches])
        .await?;

    let filter = BranchFilter {
        is_active: params.is_active,
        search: params.search,
    };

    let branches = BranchService::new(&state.db)
        .get_paginated(&filter, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(branches.into_dto(Branch::into_dto))))
}

#[utoipa::path(
    post,
    path = "/api/branches",
    tag = BRANCH_TAG,
    request_body = CreateBranchDto,
    responses(
        (status = 201, description = "Branch created", body = BranchDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_branch(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateBranchDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageBranches])
        .await?;

    let branch = BranchService::new(&state.db)
        .create(CreateBranchParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(branch.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}",
    tag = BRANCH_TAG,
    params(("branch_id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "The branch", body = BranchDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Branch not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_branch_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(branch_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewBranches])
        .await?;

    let branch = BranchService::new(&state.db).get_by_id(branch_id).await?;

    Ok((StatusCode::OK, Json(branch.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/branches/{branch_id}",
    tag = BRANCH_TAG,
    params(("branch_id" = i32, Path, description = "Branch ID")),
    request_body = UpdateBranchDto,
    responses(
        (status = 200, description = "Branch updated", body = BranchDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Branch not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_branch(
    State(state): State<AppState>,
    session: Session,
    Path(branch_id): Path<i32>,
    Json(payload): Json<UpdateBranchDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageBranches])
        .await?;

    let branch = BranchService::new(&state.db)
        .update(branch_id, UpdateBranchParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(branch.into_dto())))
}

/// Deletes a branch with no employees, items or transactions.
///
/// # Access Control
/// - `manage_branches`
///
/// # Returns
/// - `200 OK` - Branch deleted
/// - `400 Bad Request` - Branch still has dependent rows
/// - `404 Not Found` - No such branch
#[utoipa::path(
    delete,
    path = "/api/branches/{branch_id}",
    tag = BRANCH_TAG,
    params(("branch_id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch deleted", body = MessageDto),
        (status = 400, description = "Branch still in use", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Branch not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_branch(
    State(state): State<AppState>,
    session: Session,
    Path(branch_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageBranches])
        .await?;

    BranchService::new(&state.db).delete(branch_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Branch deleted successfully")),
    ))
}
