use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use entity::transaction::{TransactionStatus, TransactionType};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        transaction::{
            CancelTransactionDto, CompleteTransactionDto, CreateTransactionDto,
            TransactionDetailDto, TransactionDto, TransactionSearchDto, TransactionStatsDto,
            UpdateTransactionDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::transaction::{
            CreateTransactionParams, Transaction, TransactionFilter, UpdateTransactionParams,
        },
        service::transaction::TransactionService,
        state::AppState,
    },
};

/// Tag for grouping transaction endpoints in OpenAPI documentation
pub static TRANSACTION_TAG: &str = "transaction";

#[derive(Deserialize, IntoParams)]
pub struct TransactionListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    #[param(value_type = Option<String>)]
    pub transaction_type: Option<TransactionType>,
    #[param(value_type = Option<String>)]
    pub status: Option<TransactionStatus>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Lists transactions, most recent transaction date first.
///
/// # Access Control
/// - `view_transactions`
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = TRANSACTION_TAG,
    params(TransactionListParams),
    responses(
        (status = 200, description = "Page of transactions", body = PaginatedDto<TransactionDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TransactionListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewTransactions])
        .await?;

    let filter = TransactionFilter {
        transaction_type: params.transaction_type,
        status: params.status,
        customer_id: params.customer_id,
        branch_id: params.branch_id,
        loan_id: params.loan_id,
        start_date: params.start_date,
        end_date: params.end_date,
        ..Default::default()
    };

    let transactions = TransactionService::new(&state.db)
        .get_paginated(&filter, params.page, params.entries)
        .await?;

    Ok((
        StatusCode::OK,
        Json(transactions.into_dto(Transaction::into_dto)),
    ))
}

/// Records a transaction under a generated transaction code.
///
/// # Returns
/// - `201 Created` - Transaction created
/// - `400 Bad Request` - Non-positive amount
/// - `404 Not Found` - A referenced customer, employee, loan, item or branch is missing
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = TRANSACTION_TAG,
    request_body = CreateTransactionDto,
    responses(
        (status = 201, description = "Transaction created", body = TransactionDto),
        (status = 400, description = "Invalid amount", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Referenced row not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateTransactionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageTransactions])
        .await?;

    let transaction = TransactionService::new(&state.db)
        .create(CreateTransactionParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(transaction.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{transaction_id}",
    tag = TRANSACTION_TAG,
    params(("transaction_id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "The transaction with related names", body = TransactionDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_transaction_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(transaction_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewTransactions])
        .await?;

    let details = TransactionService::new(&state.db)
        .get_details(transaction_id)
        .await?;

    Ok((StatusCode::OK, Json(details.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{transaction_id}",
    tag = TRANSACTION_TAG,
    params(("transaction_id" = i32, Path, description = "Transaction ID")),
    request_body = UpdateTransactionDto,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionDto),
        (status = 400, description = "Transaction already closed or invalid amount", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(transaction_id): Path<i32>,
    Json(payload): Json<UpdateTransactionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageTransactions])
        .await?;

    let transaction = TransactionService::new(&state.db)
        .update(transaction_id, UpdateTransactionParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(transaction.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{transaction_id}/cancel",
    tag = TRANSACTION_TAG,
    params(("transaction_id" = i32, Path, description = "Transaction ID")),
    request_body = CancelTransactionDto,
    responses(
        (status = 200, description = "Transaction cancelled", body = TransactionDto),
        (status = 400, description = "Transaction already closed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(transaction_id): Path<i32>,
    Json(payload): Json<CancelTransactionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageTransactions])
        .await?;

    let transaction = TransactionService::new(&state.db)
        .cancel(transaction_id, payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(transaction.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{transaction_id}/complete",
    tag = TRANSACTION_TAG,
    params(("transaction_id" = i32, Path, description = "Transaction ID")),
    request_body = CompleteTransactionDto,
    responses(
        (status = 200, description = "Transaction completed", body = TransactionDto),
        (status = 400, description = "Transaction already closed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(transaction_id): Path<i32>,
    Json(payload): Json<CompleteTransactionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageTransactions])
        .await?;

    let transaction = TransactionService::new(&state.db)
        .complete(transaction_id, payload.notes)
        .await?;

    Ok((StatusCode::OK, Json(transaction.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/transactions/search",
    tag = TRANSACTION_TAG,
    params(PaginationParams),
    request_body = TransactionSearchDto,
    responses(
        (status = 200, description = "Page of matching transactions", body = PaginatedDto<TransactionDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Json(payload): Json<TransactionSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewTransactions])
        .await?;

    let filter = TransactionFilter::from_search_dto(payload);
    let transactions = TransactionService::new(&state.db)
        .get_paginated(&filter, pagination.page, pagination.entries)
        .await?;

    Ok((
        StatusCode::OK,
        Json(transactions.into_dto(Transaction::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/transactions/stats/overview",
    tag = TRANSACTION_TAG,
    responses(
        (status = 200, description = "Transaction statistics", body = TransactionStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_transaction_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewTransactions])
        .await?;

    let stats = TransactionService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
