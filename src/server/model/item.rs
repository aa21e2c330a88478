use chrono::{DateTime, Utc};
use entity::item::{ItemCategory, ItemStatus};

use crate::model::item::{CreateItemDto, ItemDto, ItemSearchDto, UpdateItemDto};

/// An inventory item, either pawned collateral or stock held for sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i32,
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub status: ItemStatus,
    pub serial_number: Option<String>,
    pub appraisal_value: i64,
    pub selling_price: Option<i64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub branch_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn from_entity(entity: entity::item::Model) -> Self {
        Self {
            id: entity.id,
            item_code: entity.item_code,
            name: entity.name,
            description: entity.description,
            category: entity.category,
            status: entity.status,
            serial_number: entity.serial_number,
            appraisal_value: entity.appraisal_value,
            selling_price: entity.selling_price,
            condition: entity.condition,
            notes: entity.notes,
            customer_id: entity.customer_id,
            branch_id: entity.branch_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Whether a new loan may be written against this item.
    pub fn is_available_for_loan(&self) -> bool {
        matches!(self.status, ItemStatus::Pawned | ItemStatus::ForSale)
    }

    pub fn into_dto(self) -> ItemDto {
        ItemDto {
            id: self.id,
            item_code: self.item_code,
            name: self.name,
            description: self.description,
            category: self.category,
            status: self.status,
            serial_number: self.serial_number,
            appraisal_value: self.appraisal_value,
            selling_price: self.selling_price,
            condition: self.condition,
            notes: self.notes,
            customer_id: self.customer_id,
            branch_id: self.branch_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateItemParams {
    pub name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub status: ItemStatus,
    pub serial_number: Option<String>,
    pub appraisal_value: i64,
    pub selling_price: Option<i64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub branch_id: i32,
}

impl CreateItemParams {
    pub fn from_dto(dto: CreateItemDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            category: dto.category,
            status: dto.status.unwrap_or(ItemStatus::ForSale),
            serial_number: dto.serial_number,
            appraisal_value: dto.appraisal_value,
            selling_price: dto.selling_price,
            condition: dto.condition,
            notes: dto.notes,
            customer_id: dto.customer_id,
            branch_id: dto.branch_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateItemParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ItemCategory>,
    pub status: Option<ItemStatus>,
    pub serial_number: Option<String>,
    pub appraisal_value: Option<i64>,
    pub selling_price: Option<i64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
}

impl UpdateItemParams {
    pub fn from_dto(dto: UpdateItemDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            category: dto.category,
            status: dto.status,
            serial_number: dto.serial_number,
            appraisal_value: dto.appraisal_value,
            selling_price: dto.selling_price,
            condition: dto.condition,
            notes: dto.notes,
            customer_id: dto.customer_id,
            branch_id: dto.branch_id,
        }
    }
}

/// Filters shared by the inventory list and search endpoints.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Matches name, item code or serial number.
    pub search_term: Option<String>,
    pub category: Option<ItemCategory>,
    pub status: Option<ItemStatus>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl ItemFilter {
    pub fn from_search_dto(dto: ItemSearchDto) -> Self {
        Self {
            search_term: dto.search_term,
            category: dto.category,
            status: dto.status,
            min_value: dto.min_value,
            max_value: dto.max_value,
            customer_id: dto.customer_id,
            branch_id: dto.branch_id,
            created_after: dto.created_after,
            created_before: dto.created_before,
        }
    }
}

/// Appends a status-change line to existing notes.
pub fn append_note(existing: Option<String>, line: &str) -> String {
    match existing {
        Some(notes) if !notes.is_empty() => format!("{}\n{}", notes, line),
        _ => line.to_string(),
    }
}
