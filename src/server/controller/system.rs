use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::api::{ErrorDto, HealthDto, RootDto},
    server::{error::AppError, state::AppState},
};

/// Tag for grouping system endpoints in OpenAPI documentation
pub static SYSTEM_TAG: &str = "system";

#[utoipa::path(
    get,
    path = "/",
    tag = SYSTEM_TAG,
    responses(
        (status = 200, description = "Service banner", body = RootDto)
    ),
)]
pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(RootDto {
            message: "Pawnshop Management System API".to_string(),
            status: "running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Reports healthy once the database answers a ping.
#[utoipa::path(
    get,
    path = "/health",
    tag = SYSTEM_TAG,
    responses(
        (status = 200, description = "Database reachable", body = HealthDto),
        (status = 500, description = "Database unreachable", body = ErrorDto)
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.db.ping().await?;

    Ok((
        StatusCode::OK,
        Json(HealthDto {
            status: "healthy".to_string(),
        }),
    ))
}
