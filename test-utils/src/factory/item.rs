//! Inventory item factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::item::{ItemCategory, ItemStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test inventory items held at a branch.
pub struct ItemFactory<'a> {
    db: &'a DatabaseConnection,
    branch_id: i32,
    item_code: String,
    name: String,
    category: ItemCategory,
    status: ItemStatus,
    appraisal_value: i64,
    selling_price: Option<i64>,
    customer_id: Option<i32>,
}

impl<'a> ItemFactory<'a> {
    /// Creates a new ItemFactory with default values.
    ///
    /// Defaults:
    /// - item_code: `"I-{id:08X}"`
    /// - category: `jewelry`, status: `for_sale`
    /// - appraisal_value: 50_000 (cents)
    pub fn new(db: &'a DatabaseConnection, branch_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            branch_id,
            item_code: format!("I-{:08X}", id),
            name: format!("Gold Ring {}", id),
            category: ItemCategory::Jewelry,
            status: ItemStatus::ForSale,
            appraisal_value: 50_000,
            selling_price: None,
            customer_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn appraisal_value(mut self, appraisal_value: i64) -> Self {
        self.appraisal_value = appraisal_value;
        self
    }

    pub fn selling_price(mut self, selling_price: Option<i64>) -> Self {
        self.selling_price = selling_price;
        self
    }

    pub fn customer_id(mut self, customer_id: Option<i32>) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Builds and inserts the item entity into the database.
    pub async fn build(self) -> Result<entity::item::Model, DbErr> {
        entity::item::ActiveModel {
            item_code: ActiveValue::Set(self.item_code),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            category: ActiveValue::Set(self.category),
            status: ActiveValue::Set(self.status),
            serial_number: ActiveValue::Set(None),
            appraisal_value: ActiveValue::Set(self.appraisal_value),
            selling_price: ActiveValue::Set(self.selling_price),
            condition: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            customer_id: ActiveValue::Set(self.customer_id),
            branch_id: ActiveValue::Set(self.branch_id),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a `for_sale` item at the given branch.
pub async fn create_item(
    db: &DatabaseConnection,
    branch_id: i32,
) -> Result<entity::item::Model, DbErr> {
    ItemFactory::new(db, branch_id).build().await
}
