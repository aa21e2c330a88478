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
        payment::{PaymentDto, UpdatePaymentDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::payment::{Payment, UpdatePaymentParams},
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

#[derive(Deserialize, IntoParams)]
pub struct PaymentListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    pub loan_id: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/payments",
    tag = PAYMENT_TAG,
    params(PaymentListParams),
    responses(
        (status = 200, description = "Page of payments, newest first", body = PaginatedDto<PaymentDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_payments(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaymentListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let payments = PaymentService::new(&state.db)
        .get_paginated(params.loan_id, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(payments.into_dto(Payment::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/payments/{payment_id}",
    tag = PAYMENT_TAG,
    params(("payment_id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "The payment", body = PaymentDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_payment_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(payment_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let payment = PaymentService::new(&state.db).get_by_id(payment_id).await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

/// Corrects a recorded payment. Payments on completed or defaulted loans are frozen.
#[utoipa::path(
    put,
    path = "/api/payments/{payment_id}",
    tag = PAYMENT_TAG,
    params(("payment_id" = i32, Path, description = "Payment ID")),
    request_body = UpdatePaymentDto,
    responses(
        (status = 200, description = "Payment updated", body = PaymentDto),
        (status = 400, description = "Loan closed or invalid amount", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_payment(
    State(state): State<AppState>,
    session: Session,
    Path(payment_id): Path<i32>,
    Json(payload): Json<UpdatePaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageLoans])
        .await?;

    let payment = PaymentService::new(&state.db)
        .update(payment_id, UpdatePaymentParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{payment_id}",
    tag = PAYMENT_TAG,
    params(("payment_id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "The deleted payment", body = PaymentDto),
        (status = 400, description = "Loan is completed or defaulted", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_payment(
    State(state): State<AppState>,
    session: Session,
    Path(payment_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageLoans])
        .await?;

    let payment = PaymentService::new(&state.db).delete(payment_id).await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}
