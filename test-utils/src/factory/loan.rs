//! Loan factory.

use crate::factory::helpers::next_id;
use chrono::{Duration, NaiveDate, Utc};
use entity::loan::LoanStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test loans against an existing customer and item.
///
/// # Example
///
/// ```rust,ignore
/// let loan = LoanFactory::new(&db, customer.id, item.id)
///     .loan_amount(10_000)
///     .interest_rate(10.0)
///     .status(LoanStatus::Pending)
///     .build()
///     .await?;
/// ```
pub struct LoanFactory<'a> {
    db: &'a DatabaseConnection,
    customer_id: i32,
    item_id: i32,
    loan_code: String,
    loan_amount: i64,
    interest_rate: f64,
    term_days: i32,
    start_date: NaiveDate,
    due_date: NaiveDate,
    status: LoanStatus,
    notes: Option<String>,
}

impl<'a> LoanFactory<'a> {
    /// Creates a new LoanFactory with default values.
    ///
    /// Defaults:
    /// - loan_amount: 10_000 cents at 10% over 30 days
    /// - start_date: today, due_date: today + 30 days
    /// - status: `active`
    pub fn new(db: &'a DatabaseConnection, customer_id: i32, item_id: i32) -> Self {
        let id = next_id();
        let today = Utc::now().date_naive();
        Self {
            db,
            customer_id,
            item_id,
            loan_code: format!("L-{:08X}", id),
            loan_amount: 10_000,
            interest_rate: 10.0,
            term_days: 30,
            start_date: today,
            due_date: today + Duration::days(30),
            status: LoanStatus::Active,
            notes: None,
        }
    }

    pub fn loan_amount(mut self, loan_amount: i64) -> Self {
        self.loan_amount = loan_amount;
        self
    }

    pub fn interest_rate(mut self, interest_rate: f64) -> Self {
        self.interest_rate = interest_rate;
        self
    }

    pub fn term_days(mut self, term_days: i32) -> Self {
        self.term_days = term_days;
        self
    }

    pub fn status(mut self, status: LoanStatus) -> Self {
        self.status = status;
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Builds and inserts the loan entity into the database.
    pub async fn build(self) -> Result<entity::loan::Model, DbErr> {
        entity::loan::ActiveModel {
            loan_code: ActiveValue::Set(self.loan_code),
            customer_id: ActiveValue::Set(self.customer_id),
            item_id: ActiveValue::Set(self.item_id),
            loan_amount: ActiveValue::Set(self.loan_amount),
            interest_rate: ActiveValue::Set(self.interest_rate),
            term_days: ActiveValue::Set(self.term_days),
            start_date: ActiveValue::Set(self.start_date),
            due_date: ActiveValue::Set(self.due_date),
            status: ActiveValue::Set(self.status),
            collateral_description: ActiveValue::Set(None),
            notes: ActiveValue::Set(self.notes),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active loan with default values.
pub async fn create_loan(
    db: &DatabaseConnection,
    customer_id: i32,
    item_id: i32,
) -> Result<entity::loan::Model, DbErr> {
    LoanFactory::new(db, customer_id, item_id).build().await
}
