//! Transaction factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::{
    payment::PaymentMethod,
    transaction::{TransactionStatus, TransactionType},
};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test ledger transactions at a branch.
pub struct TransactionFactory<'a> {
    db: &'a DatabaseConnection,
    branch_id: i32,
    transaction_code: String,
    transaction_type: TransactionType,
    amount: i64,
    payment_method: PaymentMethod,
    status: TransactionStatus,
    customer_id: Option<i32>,
    item_id: Option<i32>,
    loan_id: Option<i32>,
    transaction_date: DateTime<Utc>,
}

impl<'a> TransactionFactory<'a> {
    /// Creates a new TransactionFactory with default values.
    ///
    /// Defaults: a completed 10_000 cent cash `sale` dated now.
    pub fn new(db: &'a DatabaseConnection, branch_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            branch_id,
            transaction_code: format!("T-{:08X}", id),
            transaction_type: TransactionType::Sale,
            amount: 10_000,
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::Completed,
            customer_id: None,
            item_id: None,
            loan_id: None,
            transaction_date: Utc::now(),
        }
    }

    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn customer_id(mut self, customer_id: Option<i32>) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn item_id(mut self, item_id: Option<i32>) -> Self {
        self.item_id = item_id;
        self
    }

    pub fn loan_id(mut self, loan_id: Option<i32>) -> Self {
        self.loan_id = loan_id;
        self
    }

    pub fn transaction_date(mut self, transaction_date: DateTime<Utc>) -> Self {
        self.transaction_date = transaction_date;
        self
    }

    /// Builds and inserts the transaction entity into the database.
    pub async fn build(self) -> Result<entity::transaction::Model, DbErr> {
        entity::transaction::ActiveModel {
            transaction_code: ActiveValue::Set(self.transaction_code),
            transaction_type: ActiveValue::Set(self.transaction_type),
            amount: ActiveValue::Set(self.amount),
            payment_method: ActiveValue::Set(self.payment_method),
            status: ActiveValue::Set(self.status),
            reference_number: ActiveValue::Set(None),
            customer_id: ActiveValue::Set(self.customer_id),
            employee_id: ActiveValue::Set(None),
            loan_id: ActiveValue::Set(self.loan_id),
            item_id: ActiveValue::Set(self.item_id),
            branch_id: ActiveValue::Set(self.branch_id),
            transaction_date: ActiveValue::Set(self.transaction_date),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a completed cash sale at the given branch.
pub async fn create_transaction(
    db: &DatabaseConnection,
    branch_id: i32,
) -> Result<entity::transaction::Model, DbErr> {
    TransactionFactory::new(db, branch_id).build().await
}
