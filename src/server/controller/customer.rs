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
        api::{ErrorDto, PaginatedDto},
        customer::{
            CreateCustomerDto, CustomerDto, CustomerSearchDto, CustomerStatsDto,
            UpdateCustomerDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::customer::{Customer, CustomerFilter, CreateCustomerParams, UpdateCustomerParams},
        service::customer::CustomerService,
        state::AppState,
    },
};

/// Tag for grouping customer endpoints in OpenAPI documentation
pub static CUSTOMER_TAG: &str = "customer";

#[derive(Deserialize, IntoParams)]
pub struct CustomerListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    /// Matches first or last name, email, phone or customer code.
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

/// Lists customers, newest first.
///
/// # Access Control
/// - `view_customers`
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = CUSTOMER_TAG,
    params(CustomerListParams),
    responses(
        (status = 200, description = "Page of customers", body = PaginatedDto<CustomerDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customers(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CustomerListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewCustomers])
        .await?;

    let filter = CustomerFilter {
        search_term: params.search,
        is_active: params.is_active,
        ..Default::default()
    };

    let customers = CustomerService::new(&state.db)
        .get_paginated(&filter, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(customers.into_dto(Customer::into_dto))))
}

/// Registers a customer under a generated customer code.
///
/// # Returns
/// - `201 Created` - Customer created
/// - `400 Bad Request` - Email or phone number already in use
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = CUSTOMER_TAG,
    request_body = CreateCustomerDto,
    responses(
        (status = 201, description = "Customer created", body = CustomerDto),
        (status = 400, description = "Email or phone number already in use", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_customer(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCustomerDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCustomers])
        .await?;

    let customer = CustomerService::new(&state.db)
        .create(CreateCustomerParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(customer.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/customers/{customer_id}",
    tag = CUSTOMER_TAG,
    params(("customer_id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "The customer", body = CustomerDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Customer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customer_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewCustomers])
        .await?;

    let customer = CustomerService::new(&state.db)
        .get_by_id(customer_id)
        .await?;

    Ok((StatusCode::OK, Json(customer.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/customers/{customer_id}",
    tag = CUSTOMER_TAG,
    params(("customer_id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerDto,
    responses(
        (status = 200, description = "Customer updated", body = CustomerDto),
        (status = 400, description = "Email or phone number already in use", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Customer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_customer(
    State(state): State<AppState>,
    session: Session,
    Path(customer_id): Path<i32>,
    Json(payload): Json<UpdateCustomerDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCustomers])
        .await?;

    let customer = CustomerService::new(&state.db)
        .update(customer_id, UpdateCustomerParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(customer.into_dto())))
}

/// Deactivates a customer. The row is kept for loan and transaction history.
///
/// # Access Control
/// - `manage_customers`
///
/// # Returns
/// - `200 OK` - The deactivated customer
/// - `400 Bad Request` - Customer still has open loans
/// - `404 Not Found` - No such customer
#[utoipa::path(
    delete,
    path = "/api/customers/{customer_id}",
    tag = CUSTOMER_TAG,
    params(("customer_id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deactivated", body = CustomerDto),
        (status = 400, description = "Customer has open loans", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Customer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    session: Session,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCustomers])
        .await?;

    let customer = CustomerService::new(&state.db).delete(customer_id).await?;

    Ok((StatusCode::OK, Json(customer.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/customers/search",
    tag = CUSTOMER_TAG,
    params(PaginationParams),
    request_body = CustomerSearchDto,
    responses(
        (status = 200, description = "Page of matching customers", body = PaginatedDto<CustomerDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_customers(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Json(payload): Json<CustomerSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewCustomers])
        .await?;

    let filter = CustomerFilter::from_search_dto(payload);
    let customers = CustomerService::new(&state.db)
        .get_paginated(&filter, pagination.page, pagination.entries)
        .await?;

    Ok((StatusCode::OK, Json(customers.into_dto(Customer::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/customers/stats/overview",
    tag = CUSTOMER_TAG,
    responses(
        (status = 200, description = "Customer statistics", body = CustomerStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customer_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewCustomers])
        .await?;

    let stats = CustomerService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
