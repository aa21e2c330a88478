use chrono::{DateTime, Utc};
use entity::item::{ItemCategory, ItemStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ItemDto {
    pub id: i32,
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub category: ItemCategory,
    #[schema(value_type = String)]
    pub status: ItemStatus,
    pub serial_number: Option<String>,
    /// Cents.
    pub appraisal_value: i64,
    /// Cents.
    pub selling_price: Option<i64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub branch_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateItemDto {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub category: ItemCategory,
    /// Defaults to `for_sale`.
    #[schema(value_type = Option<String>)]
    pub status: Option<ItemStatus>,
    pub serial_number: Option<String>,
    pub appraisal_value: i64,
    pub selling_price: Option<i64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub branch_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateItemDto {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub category: Option<ItemCategory>,
    #[schema(value_type = Option<String>)]
    pub status: Option<ItemStatus>,
    pub serial_number: Option<String>,
    pub appraisal_value: Option<i64>,
    pub selling_price: Option<i64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ItemStatusUpdateDto {
    #[schema(value_type = String)]
    pub status: ItemStatus,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct ItemSearchDto {
    pub search_term: Option<String>,
    #[schema(value_type = Option<String>)]
    pub category: Option<ItemCategory>,
    #[schema(value_type = Option<String>)]
    pub status: Option<ItemStatus>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct InventoryStatsDto {
    pub total_items: u64,
    pub items_by_status: BTreeMap<String, u64>,
    pub items_by_category: BTreeMap<String, u64>,
    /// Sum of appraisal values in cents.
    pub total_inventory_value: i64,
    /// Mean appraisal value in cents.
    pub avg_item_value: f64,
    pub items_added_this_month: u64,
    pub items_sold_this_month: u64,
}
