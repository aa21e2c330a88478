//! Loan application factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::{application::ApplicationStatus, item::ItemCategory};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test loan applications.
pub struct ApplicationFactory<'a> {
    db: &'a DatabaseConnection,
    customer_id: i32,
    branch_id: i32,
    application_number: String,
    estimated_value: i64,
    loan_amount: i64,
    status: ApplicationStatus,
}

impl<'a> ApplicationFactory<'a> {
    /// Creates a new ApplicationFactory with default values.
    ///
    /// Defaults: pending, estimated at 100_000 cents requesting 80_000 cents.
    pub fn new(db: &'a DatabaseConnection, customer_id: i32, branch_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            customer_id,
            branch_id,
            application_number: format!("APP-{}-{:08X}", Utc::now().format("%Y%m%d"), id),
            estimated_value: 100_000,
            loan_amount: 80_000,
            status: ApplicationStatus::Pending,
        }
    }

    pub fn estimated_value(mut self, estimated_value: i64) -> Self {
        self.estimated_value = estimated_value;
        self
    }

    pub fn loan_amount(mut self, loan_amount: i64) -> Self {
        self.loan_amount = loan_amount;
        self
    }

    pub fn status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds and inserts the application entity into the database.
    pub async fn build(self) -> Result<entity::application::Model, DbErr> {
        entity::application::ActiveModel {
            application_number: ActiveValue::Set(self.application_number),
            customer_id: ActiveValue::Set(self.customer_id),
            branch_id: ActiveValue::Set(self.branch_id),
            item_category: ActiveValue::Set(ItemCategory::Jewelry),
            item_description: ActiveValue::Set("Gold necklace".to_string()),
            estimated_value: ActiveValue::Set(self.estimated_value),
            loan_amount: ActiveValue::Set(self.loan_amount),
            interest_rate: ActiveValue::Set(5.0),
            term_months: ActiveValue::Set(3),
            status: ActiveValue::Set(self.status),
            notes: ActiveValue::Set(None),
            processed_by_id: ActiveValue::Set(None),
            processed_at: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending application with default values.
pub async fn create_application(
    db: &DatabaseConnection,
    customer_id: i32,
    branch_id: i32,
) -> Result<entity::application::Model, DbErr> {
    ApplicationFactory::new(db, customer_id, branch_id)
        .build()
        .await
}
