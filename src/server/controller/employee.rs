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
        employee::{
            CreateEmployeeDto, CreateEmployeeTypeDto, EmployeeDto, EmployeeSearchDto,
            EmployeeStatsDto, EmployeeTypeDto, UpdateEmployeeDto, UpdateEmployeeTypeDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::employee::{
            CreateEmployeeParams, CreateEmployeeTypeParams, EmployeeDetails, EmployeeFilter,
            UpdateEmployeeParams, UpdateEmployeeTypeParams,
        },
        service::employee::EmployeeService,
        state::AppState,
    },
};

/// Tag for grouping employee endpoints in OpenAPI documentation
pub static EMPLOYEE_TAG: &str = "employee";

#[derive(Deserialize, IntoParams)]
pub struct EmployeeListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    pub branch_id: Option<i32>,
    pub employee_type_id: Option<i32>,
    pub is_active: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/employees/types",
    tag = EMPLOYEE_TAG,
    responses(
        (status = 200, description = "All employee types", body = Vec<EmployeeTypeDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_employee_types(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let types: Vec<EmployeeTypeDto> = EmployeeService::new(&state.db)
        .get_types()
        .await?
        .into_iter()
        .map(|t| t.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(types)))
}

#[utoipa::path(
    post,
    path = "/api/employees/types",
    tag = EMPLOYEE_TAG,
    request_body = CreateEmployeeTypeDto,
    responses(
        (status = 201, description = "Employee type created", body = EmployeeTypeDto),
        (status = 400, description = "Duplicate name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_employee_type(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateEmployeeTypeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let employee_type = EmployeeService::new(&state.db)
        .create_type(CreateEmployeeTypeParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(employee_type.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/employees/types/{type_id}",
    tag = EMPLOYEE_TAG,
    params(("type_id" = i32, Path, description = "Employee type ID")),
    responses(
        (status = 200, description = "The employee type", body = EmployeeTypeDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Employee type not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_employee_type_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(type_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let employee_type = EmployeeService::new(&state.db).get_type(type_id).await?;

    Ok((StatusCode::OK, Json(employee_type.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/employees/types/{type_id}",
    tag = EMPLOYEE_TAG,
    params(("type_id" = i32, Path, description = "Employee type ID")),
    request_body = UpdateEmployeeTypeDto,
    responses(
        (status = 200, description = "Employee type updated", body = EmployeeTypeDto),
        (status = 400, description = "Duplicate name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Employee type not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_employee_type(
    State(state): State<AppState>,
    session: Session,
    Path(type_id): Path<i32>,
    Json(payload): Json<UpdateEmployeeTypeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let employee_type = EmployeeService::new(&state.db)
        .update_type(type_id, UpdateEmployeeTypeParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(employee_type.into_dto())))
}

/// Deletes an employee type that no employee is assigned to.
#[utoipa::path(
    delete,
    path = "/api/employees/types/{type_id}",
    tag = EMPLOYEE_TAG,
    params(("type_id" = i32, Path, description = "Employee type ID")),
    responses(
        (status = 200, description = "The deleted employee type", body = EmployeeTypeDto),
        (status = 400, description = "Type still assigned to employees", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Employee type not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_employee_type(
    State(state): State<AppState>,
    session: Session,
    Path(type_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let employee_type = EmployeeService::new(&state.db).delete_type(type_id).await?;

    Ok((StatusCode::OK, Json(employee_type.into_dto())))
}

/// Lists employees joined with their user, branch and type.
///
/// # Access Control
/// - `view_users`
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    params(EmployeeListParams),
    responses(
        (status = 200, description = "Page of employees", body = PaginatedDto<EmployeeDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_employees(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<EmployeeListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let filter = EmployeeFilter {
        branch_id: params.branch_id,
        employee_type_id: params.employee_type_id,
        is_active: params.is_active,
        ..Default::default()
    };

    let employees = EmployeeService::new(&state.db)
        .get_paginated(&filter, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(employees.into_dto(EmployeeDetails::into_dto))))
}

#[utoipa::path(
    post,
    path = "/api/employees/search",
    tag = EMPLOYEE_TAG,
    params(PaginationParams),
    request_body = EmployeeSearchDto,
    responses(
        (status = 200, description = "Page of matching employees", body = PaginatedDto<EmployeeDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_employees(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Json(payload): Json<EmployeeSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let filter = EmployeeFilter::from_search_dto(payload);
    let employees = EmployeeService::new(&state.db)
        .get_paginated(&filter, pagination.page, pagination.entries)
        .await?;

    Ok((StatusCode::OK, Json(employees.into_dto(EmployeeDetails::into_dto))))
}

/// Creates the employee record for an existing user.
///
/// # Returns
/// - `201 Created` - Employee created
/// - `400 Bad Request` - The user already has an employee record
/// - `404 Not Found` - Unknown user, branch or employee type
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    request_body = CreateEmployeeDto,
    responses(
        (status = 201, description = "Employee created", body = EmployeeDto),
        (status = 400, description = "Employee record already exists", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Unknown user, branch or type", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_employee(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateEmployeeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let employee = EmployeeService::new(&state.db)
        .create(CreateEmployeeParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(employee.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    tag = EMPLOYEE_TAG,
    params(("employee_id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "The employee", body = EmployeeDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Employee not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_employee_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(employee_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let employee = EmployeeService::new(&state.db)
        .get_by_id(employee_id)
        .await?;

    Ok((StatusCode::OK, Json(employee.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    tag = EMPLOYEE_TAG,
    params(("employee_id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployeeDto,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Unknown employee, branch or type", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_employee(
    State(state): State<AppState>,
    session: Session,
    Path(employee_id): Path<i32>,
    Json(payload): Json<UpdateEmployeeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let employee = EmployeeService::new(&state.db)
        .update(employee_id, UpdateEmployeeParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(employee.into_dto())))
}

/// Removes an employee record and deactivates the linked user account.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    tag = EMPLOYEE_TAG,
    params(("employee_id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Employee not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    session: Session,
    Path(employee_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    EmployeeService::new(&state.db).delete(employee_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Employee deleted successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/employees/stats/overview",
    tag = EMPLOYEE_TAG,
    responses(
        (status = 200, description = "Employee statistics", body = EmployeeStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_employee_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let stats = EmployeeService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
