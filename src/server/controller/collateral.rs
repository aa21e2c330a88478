use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, loan::CollateralDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{item::Item, loan::Loan},
        service::collateral::CollateralService,
        state::AppState,
    },
};

/// Tag for grouping collateral endpoints in OpenAPI documentation
pub static COLLATERAL_TAG: &str = "collateral";

#[utoipa::path(
    get,
    path = "/api/collaterals/{loan_id}/collateral",
    tag = COLLATERAL_TAG,
    params(("loan_id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "The loan and the item securing it", body = CollateralDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Loan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_loan_collateral(
    State(state): State<AppState>,
    session: Session,
    Path(loan_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let (loan, item) = CollateralService::new(&state.db).for_loan(loan_id).await?;

    Ok((StatusCode::OK, Json(collateral_dto(loan, item))))
}

/// Gets the most recent loan written against an item.
#[utoipa::path(
    get,
    path = "/api/collaterals/items/{item_id}",
    tag = COLLATERAL_TAG,
    params(("item_id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "The item's latest loan", body = CollateralDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "No loan found for this item", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_item_collateral(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewLoans])
        .await?;

    let (loan, item) = CollateralService::new(&state.db).for_item(item_id).await?;

    Ok((StatusCode::OK, Json(collateral_dto(loan, item))))
}

fn collateral_dto(loan: Loan, item: Item) -> CollateralDto {
    CollateralDto {
        loan: loan.into_dto(),
        item: item.into_dto(),
    }
}
