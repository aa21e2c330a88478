use std::collections::BTreeMap;

use entity::item::ItemStatus;
use sea_orm::{ActiveEnum, DatabaseConnection};

use crate::{
    model::item::InventoryStatsDto,
    server::{
        data::{branch::BranchRepository, customer::CustomerRepository, item::ItemRepository},
        error::AppError,
        model::{
            item::{append_note, CreateItemParams, Item, ItemFilter, UpdateItemParams},
            Paginated,
        },
        service::MAX_CODE_ATTEMPTS,
        util::{
            code::{generate_code, ITEM_PREFIX},
            time::{same_month, today},
        },
    },
};

pub struct InventoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &ItemFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Item>, AppError> {
        let (items, total) = ItemRepository::new(self.db)
            .get_all_paginated(filter, page, per_page)
            .await?;

        Ok(Paginated::new(items, total, page, per_page))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Item, AppError> {
        ItemRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, params: CreateItemParams) -> Result<Item, AppError> {
        self.ensure_references(params.customer_id, Some(params.branch_id))
            .await?;

        let code = self.unique_code().await?;
        let item = ItemRepository::new(self.db).create(params, code).await?;

        tracing::info!("Added item {} to inventory", item.item_code);

        Ok(item)
    }

    pub async fn update(&self, id: i32, params: UpdateItemParams) -> Result<Item, AppError> {
        let repo = ItemRepository::new(self.db);
        let existing = self.get_by_id(id).await?;

        self.ensure_references(params.customer_id, params.branch_id)
            .await?;

        if let Some(status) = params.status {
            if status != existing.status && repo.has_open_loan(id).await? {
                return Err(status_locked());
            }
        }

        repo.update(id, params).await?.ok_or_else(not_found)
    }

    /// Changes an item's status, appending `Status changed to {status}: {notes}` to
    /// its notes when notes are given.
    pub async fn update_status(
        &self,
        id: i32,
        status: ItemStatus,
        notes: Option<String>,
    ) -> Result<Item, AppError> {
        let repo = ItemRepository::new(self.db);
        let item = self.get_by_id(id).await?;

        if status != item.status && repo.has_open_loan(id).await? {
            return Err(status_locked());
        }

        let notes = notes.map(|notes| {
            append_note(
                item.notes.clone(),
                &format!("Status changed to {}: {}", status.to_value(), notes),
            )
        });

        repo.set_status(id, status, notes)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, id: i32) -> Result<Item, AppError> {
        let repo = ItemRepository::new(self.db);
        let item = self.get_by_id(id).await?;

        if repo.has_open_loan(id).await? {
            return Err(AppError::BadRequest(
                "Cannot delete item that is associated with an active loan".to_string(),
            ));
        }

        let loans = repo.count_loans(id).await?;
        if loans > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete item with {} loan records",
                loans
            )));
        }

        repo.delete(id).await?;

        Ok(item)
    }

    pub async fn stats(&self) -> Result<InventoryStatsDto, AppError> {
        let today = today();
        let items = ItemRepository::new(self.db)
            .get_all(&ItemFilter::default())
            .await?;

        let mut items_by_status: BTreeMap<String, u64> = BTreeMap::new();
        let mut items_by_category: BTreeMap<String, u64> = BTreeMap::new();
        for item in &items {
            *items_by_status.entry(item.status.to_value()).or_default() += 1;
            *items_by_category.entry(item.category.to_value()).or_default() += 1;
        }

        let total_inventory_value: i64 = items.iter().map(|i| i.appraisal_value).sum();
        let avg_item_value = if items.is_empty() {
            0.0
        } else {
            total_inventory_value as f64 / items.len() as f64
        };

        Ok(InventoryStatsDto {
            total_items: items.len() as u64,
            items_by_status,
            items_by_category,
            total_inventory_value,
            avg_item_value,
            items_added_this_month: items
                .iter()
                .filter(|i| same_month(i.created_at, today))
                .count() as u64,
            items_sold_this_month: items
                .iter()
                .filter(|i| i.status == ItemStatus::Sold)
                .filter(|i| same_month(i.updated_at.unwrap_or(i.created_at), today))
                .count() as u64,
        })
    }

    async fn ensure_references(
        &self,
        customer_id: Option<i32>,
        branch_id: Option<i32>,
    ) -> Result<(), AppError> {
        if let Some(customer_id) = customer_id {
            if CustomerRepository::new(self.db)
                .find_by_id(customer_id)
                .await?
                .is_none()
            {
                return Err(AppError::NotFound("Customer not found".to_string()));
            }
        }

        if let Some(branch_id) = branch_id {
            if BranchRepository::new(self.db)
                .find_by_id(branch_id)
                .await?
                .is_none()
            {
                return Err(AppError::NotFound("Branch not found".to_string()));
            }
        }

        Ok(())
    }

    async fn unique_code(&self) -> Result<String, AppError> {
        let repo = ItemRepository::new(self.db);
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code(ITEM_PREFIX);
            if !repo.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::InternalError(
            "Failed to generate a unique item code".to_string(),
        ))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Item not found".to_string())
}

fn status_locked() -> AppError {
    AppError::BadRequest(
        "Cannot change the status of an item that is associated with an active loan".to_string(),
    )
}
