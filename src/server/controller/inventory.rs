use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::item::{ItemCategory, ItemStatus};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        item::{
            CreateItemDto, InventoryStatsDto, ItemDto, ItemSearchDto, ItemStatusUpdateDto,
            UpdateItemDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::item::{CreateItemParams, Item, ItemFilter, UpdateItemParams},
        service::inventory::InventoryService,
        state::AppState,
    },
};

/// Tag for grouping inventory endpoints in OpenAPI documentation
pub static INVENTORY_TAG: &str = "inventory";

#[derive(Deserialize, IntoParams)]
pub struct ItemListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    #[param(value_type = Option<String>)]
    pub category: Option<ItemCategory>,
    #[param(value_type = Option<String>)]
    pub status: Option<ItemStatus>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    /// Matches name, item code or serial number.
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = INVENTORY_TAG,
    params(ItemListParams),
    responses(
        (status = 200, description = "Page of items", body = PaginatedDto<ItemDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_items(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ItemListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewInventory])
        .await?;

    let filter = ItemFilter {
        search_term: params.search,
        category: params.category,
        status: params.status,
        customer_id: params.customer_id,
        branch_id: params.branch_id,
        ..Default::default()
    };

    let items = InventoryService::new(&state.db)
        .get_paginated(&filter, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(items.into_dto(Item::into_dto))))
}

/// Adds an item under a generated item code. Status defaults to `for_sale`.
///
/// # Access Control
/// - `manage_inventory`
///
/// # Returns
/// - `201 Created` - Item created
/// - `404 Not Found` - Unknown customer or branch
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = INVENTORY_TAG,
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item created", body = ItemDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Unknown customer or branch", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateItemDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageInventory])
        .await?;

    let item = InventoryService::new(&state.db)
        .create(CreateItemParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{item_id}",
    tag = INVENTORY_TAG,
    params(("item_id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "The item", body = ItemDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_item_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewInventory])
        .await?;

    let item = InventoryService::new(&state.db).get_by_id(item_id).await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{item_id}",
    tag = INVENTORY_TAG,
    params(("item_id" = i32, Path, description = "Item ID")),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated", body = ItemDto),
        (status = 400, description = "Status locked by an open loan", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Item, customer or branch not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(payload): Json<UpdateItemDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageInventory])
        .await?;

    let item = InventoryService::new(&state.db)
        .update(item_id, UpdateItemParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{item_id}",
    tag = INVENTORY_TAG,
    params(("item_id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "The deleted item", body = ItemDto),
        (status = 400, description = "Item is under an open loan", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageInventory])
        .await?;

    let item = InventoryService::new(&state.db).delete(item_id).await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Sets an item's status, appending the given notes to the item's history.
#[utoipa::path(
    put,
    path = "/api/inventory/{item_id}/status",
    tag = INVENTORY_TAG,
    params(("item_id" = i32, Path, description = "Item ID")),
    request_body = ItemStatusUpdateDto,
    responses(
        (status = 200, description = "Status updated", body = ItemDto),
        (status = 400, description = "Status locked by an open loan", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_item_status(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(payload): Json<ItemStatusUpdateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageInventory])
        .await?;

    let item = InventoryService::new(&state.db)
        .update_status(item_id, payload.status, payload.notes)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/inventory/search",
    tag = INVENTORY_TAG,
    params(PaginationParams),
    request_body = ItemSearchDto,
    responses(
        (status = 200, description = "Page of matching items", body = PaginatedDto<ItemDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_items(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Json(payload): Json<ItemSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewInventory])
        .await?;

    let filter = ItemFilter::from_search_dto(payload);
    let items = InventoryService::new(&state.db)
        .get_paginated(&filter, pagination.page, pagination.entries)
        .await?;

    Ok((StatusCode::OK, Json(items.into_dto(Item::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/inventory/stats/overview",
    tag = INVENTORY_TAG,
    responses(
        (status = 200, description = "Inventory statistics", body = InventoryStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_inventory_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewInventory])
        .await?;

    let stats = InventoryService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
