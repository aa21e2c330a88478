use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::loan::LoanStatus;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        loan::{
            CreateLoanDto, CreatePaymentDto, DefaultLoanDto, ExtendLoanDto, LoanDetailDto,
            LoanDto, LoanSearchDto, LoanStatsDto, RedeemLoanDto, UpdateLoanDto,
        },
        payment::PaymentDto,
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            loan::{CreateLoanParams, Loan, LoanFilter, UpdateLoanParams},
            payment::CreatePaymentParams,
        },
        service::loan::LoanService,
        state::AppState,
    },
};

/// Tag for grouping loan endpoints in OpenAPI documentation
pub static LOAN_TAG: &str = "loan";

#[derive(Deserialize, IntoParams)]
pub struct LoanListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    #[param(value_type = Option<String>)]
    pub status: Option<LoanStatus>,
    pub customer_id: Option<i32>,
    pub item_id: Option<i32>,
    pub is_overdue: Option<bool>,
}

/// Lists loans with balances computed as of today.
///
/// # Access Control
/// - `view_loans`
#[utoipa::path(
    get,
    path = "/api/loans",
    tag = LOAN_TAG,
    params(LoanListParams),
    responses(
        (status = 200, description = "Page of loans", body = PaginatedDto<LoanDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_loans(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoanListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let filter = LoanFilter {
        status: params.status,
        customer_id: params.customer_id,
        item_id: params.item_id,
        is_overdue: params.is_overdue,
        ..Default::default()
    };

    let loans = LoanService::new(&state.db)
        .get_paginated(&filter, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(loans.into_dto(Loan::into_dto))))
}

/// Pawns an item against a new loan.
///
/// The item is marked `pawned` and a `pawn` transaction is recorded in the same
/// database transaction as the loan.
///
/// # Access Control
/// - `create_loans`
///
/// # Returns
/// - `201 Created` - Loan created
/// - `400 Bad Request` - Invalid amounts, or the item is not available
/// - `404 Not Found` - Unknown customer or item
#[utoipa::path(
    post,
    path = "/api/loans",
    tag = LOAN_TAG,
    request_body = CreateLoanDto,
    responses(
        (status = 201, description = "Loan created", body = LoanDto),
        (status = 400, description = "Invalid loan or unavailable item", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Customer or item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_loan(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateLoanDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateLoans])
        .await?;

    let params = CreateLoanParams::from_dto(payload).map_err(AppError::BadRequest)?;
    let loan = LoanService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(loan.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/loans/{loan_id}",
    tag = LOAN_TAG,
    params(("loan_id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "The loan with customer, item and payments", body = LoanDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Loan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_loan_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(loan_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let details = LoanService::new(&state.db).get_details(loan_id).await?;

    Ok((StatusCode::OK, Json(details.into_dto())))
}

/// Updates loan terms. A status change must follow the loan status transition table.
///
/// # Access Control
/// - `manage_loans`
#[utoipa::path(
    put,
    path = "/api/loans/{loan_id}",
    tag = LOAN_TAG,
    params(("loan_id" = i32, Path, description = "Loan ID")),
    request_body = UpdateLoanDto,
    responses(
        (status = 200, description = "Loan updated", body = LoanDto),
        (status = 400, description = "Loan closed or invalid status transition", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Loan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_loan(
    State(state): State<AppState>,
    session: Session,
    Path(loan_id): Path<i32>,
    Json(payload): Json<UpdateLoanDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageLoans])
        .await?;

    let loan = LoanService::new(&state.db)
        .update(loan_id, UpdateLoanParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(loan.into_dto())))
}

/// Records a payment. Paying off the full amount due completes the loan.
///
/// # Access Control
/// - `create_loans`
///
/// # Returns
/// - `201 Created` - Payment recorded
/// - `400 Bad Request` - Non-positive amount, or the loan does not accept payments
/// - `404 Not Found` - Loan not found
#[utoipa::path(
    post,
    path = "/api/loans/{loan_id}/payments",
    tag = LOAN_TAG,
    params(("loan_id" = i32, Path, description = "Loan ID")),
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentDto),
        (status = 400, description = "Invalid amount or closed loan", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Loan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_payment(
    State(state): State<AppState>,
    session: Session,
    Path(loan_id): Path<i32>,
    Json(payload): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateLoans])
        .await?;

    let payment = LoanService::new(&state.db)
        .add_payment(CreatePaymentParams::from_dto(loan_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/loans/{loan_id}/extend",
    tag = LOAN_TAG,
    params(("loan_id" = i32, Path, description = "Loan ID")),
    request_body = ExtendLoanDto,
    responses(
        (status = 200, description = "Loan extended", body = LoanDto),
        (status = 400, description = "Loan cannot be extended", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Loan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn extend_loan(
    State(state): State<AppState>,
    session: Session,
    Path(loan_id): Path<i32>,
    Json(payload): Json<ExtendLoanDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateLoans])
        .await?;

    let loan = LoanService::new(&state.db).extend(loan_id, payload).await?;

    Ok((StatusCode::OK, Json(loan.into_dto())))
}

/// Closes a loan with a final payment covering the remaining balance and releases
/// the item back to the customer.
#[utoipa::path(
    put,
    path = "/api/loans/{loan_id}/redeem",
    tag = LOAN_TAG,
    params(("loan_id" = i32, Path, description = "Loan ID")),
    request_body = RedeemLoanDto,
    responses(
        (status = 200, description = "Loan redeemed", body = LoanDto),
        (status = 400, description = "Loan not open or payment too small", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Loan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn redeem_loan(
    State(state): State<AppState>,
    session: Session,
    Path(loan_id): Path<i32>,
    Json(payload): Json<RedeemLoanDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateLoans])
        .await?;

    let loan = LoanService::new(&state.db).redeem(loan_id, payload).await?;

    Ok((StatusCode::OK, Json(loan.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/loans/{loan_id}/default",
    tag = LOAN_TAG,
    params(("loan_id" = i32, Path, description = "Loan ID")),
    request_body = DefaultLoanDto,
    responses(
        (status = 200, description = "Loan defaulted", body = LoanDto),
        (status = 400, description = "Loan is not open", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Loan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn default_loan(
    State(state): State<AppState>,
    session: Session,
    Path(loan_id): Path<i32>,
    Json(payload): Json<DefaultLoanDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageLoans])
        .await?;

    let loan = LoanService::new(&state.db)
        .default_loan(loan_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(loan.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/loans/search",
    tag = LOAN_TAG,
    params(PaginationParams),
    request_body = LoanSearchDto,
    responses(
        (status = 200, description = "Page of matching loans", body = PaginatedDto<LoanDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_loans(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Json(payload): Json<LoanSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let filter = LoanFilter::from_search_dto(payload);
    let loans = LoanService::new(&state.db)
        .get_paginated(&filter, pagination.page, pagination.entries)
        .await?;

    Ok((StatusCode::OK, Json(loans.into_dto(Loan::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/loans/stats/overview",
    tag = LOAN_TAG,
    responses(
        (status = 200, description = "Loan statistics", body = LoanStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_loan_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let stats = LoanService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
