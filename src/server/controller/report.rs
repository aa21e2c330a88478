use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        report::{
            CustomerReportDto, DashboardDto, InventoryReportDto, LoanReportDto,
            ReportRangeQueryDto, SalesReportDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::report::{ReportRange, ReportService},
        state::AppState,
        util::export::csv_attachment,
    },
};

/// Tag for grouping report endpoints in OpenAPI documentation
pub static REPORT_TAG: &str = "report";

#[derive(Deserialize, IntoParams)]
pub struct DashboardParams {
    /// Length of the daily series, 1 to 365.
    #[serde(default = "default_dashboard_days")]
    pub days: i64,
}

fn default_dashboard_days() -> i64 {
    30
}

#[derive(Deserialize, IntoParams)]
pub struct BranchParams {
    pub branch_id: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/reports/dashboard",
    tag = REPORT_TAG,
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardDto),
        (status = 400, description = "Days out of range", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DashboardParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewReports])
        .await?;

    let dashboard = ReportService::new(&state.db).dashboard(params.days).await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Completed sales in a date range, the last 30 days when no range is given.
///
/// # Access Control
/// - `view_reports`
#[utoipa::path(
    get,
    path = "/api/reports/sales",
    tag = REPORT_TAG,
    params(ReportRangeQueryDto),
    responses(
        (status = 200, description = "Sales report", body = SalesReportDto),
        (status = 400, description = "Start date after end date", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_sales_report(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ReportRangeQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewReports])
        .await?;

    let range = resolve_range(query)?;
    let report = ReportService::new(&state.db).sales(range).await?;

    Ok((StatusCode::OK, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/reports/loans",
    tag = REPORT_TAG,
    params(ReportRangeQueryDto),
    responses(
        (status = 200, description = "Loan report", body = LoanReportDto),
        (status = 400, description = "Start date after end date", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_loan_report(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ReportRangeQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewReports])
        .await?;

    let range = resolve_range(query)?;
    let report = ReportService::new(&state.db).loans(range).await?;

    Ok((StatusCode::OK, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/reports/inventory",
    tag = REPORT_TAG,
    params(BranchParams),
    responses(
        (status = 200, description = "Inventory report", body = InventoryReportDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_inventory_report(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<BranchParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewReports])
        .await?;

    let report = ReportService::new(&state.db)
        .inventory(params.branch_id)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/reports/customers",
    tag = REPORT_TAG,
    responses(
        (status = 200, description = "Customer report", body = CustomerReportDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customer_report(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewReports])
        .await?;

    let report = ReportService::new(&state.db).customers().await?;

    Ok((StatusCode::OK, Json(report)))
}

/// Downloads completed sales in the range as `sales_report_{start}_{end}.csv`.
#[utoipa::path(
    get,
    path = "/api/reports/export/sales",
    tag = REPORT_TAG,
    params(ReportRangeQueryDto),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv", body = String),
        (status = 400, description = "Start date after end date", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_sales_report(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ReportRangeQueryDto>,
) -> Result<Response, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewReports])
        .await?;

    let range = resolve_range(query)?;
    let export = ReportService::new(&state.db).export_sales(range).await?;

    Ok(csv_attachment(&export.filename, export.body))
}

/// Downloads loans created in the range as `loan_report_{start}_{end}.csv`.
#[utoipa::path(
    get,
    path = "/api/reports/export/loans",
    tag = REPORT_TAG,
    params(ReportRangeQueryDto),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv", body = String),
        (status = 400, description = "Start date after end date", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_loan_report(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ReportRangeQueryDto>,
) -> Result<Response, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewReports])
        .await?;

    let range = resolve_range(query)?;
    let export = ReportService::new(&state.db).export_loans(range).await?;

    Ok(csv_attachment(&export.filename, export.body))
}

fn resolve_range(query: ReportRangeQueryDto) -> Result<ReportRange, AppError> {
    ReportRange::resolve(query.start_date, query.end_date, query.branch_id)
}
