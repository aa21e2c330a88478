//! Loan domain model, balance arithmetic and status transitions.
//!
//! Balance figures are derived on every read from the principal, the flat interest
//! rate and the sum of recorded payments. Nothing derived is stored, so a loan whose
//! due date has passed reports itself overdue without any background job.

use chrono::{DateTime, NaiveDate, Utc};
use entity::{loan::LoanStatus, payment::PaymentMethod};
use sea_orm::ActiveEnum;

use crate::{
    model::loan::{CreateLoanDto, LoanDetailDto, LoanDto, LoanSearchDto, UpdateLoanDto},
    server::{
        model::{customer::Customer, item::Item, payment::Payment},
        util::time::{add_days, today},
    },
};

/// Flat interest on `amount` cents at `rate` percent, rounded to the nearest cent.
pub fn flat_interest(amount: i64, rate: f64) -> i64 {
    (amount as f64 * rate / 100.0).round() as i64
}

/// Whether `from → to` is a permitted manual status change.
pub fn can_transition(from: LoanStatus, to: LoanStatus) -> bool {
    use LoanStatus::*;

    matches!(
        (from, to),
        (Pending, Active)
            | (Pending, Cancelled)
            | (Active, Overdue)
            | (Active, Extended)
            | (Active, Completed)
            | (Active, Defaulted)
            | (Overdue, Active)
            | (Overdue, Extended)
            | (Overdue, Completed)
            | (Overdue, Defaulted)
            | (Extended, Overdue)
            | (Extended, Completed)
            | (Extended, Defaulted)
    )
}

/// Statuses after which a loan can no longer be edited.
pub fn is_terminal(status: LoanStatus) -> bool {
    matches!(
        status,
        LoanStatus::Completed | LoanStatus::Defaulted | LoanStatus::Cancelled
    )
}

/// A loan together with the total of its payments.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: i32,
    pub loan_code: String,
    pub customer_id: i32,
    pub item_id: i32,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_days: i32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
    pub collateral_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Sum of all payments recorded against the loan, in cents.
    pub total_paid: i64,
}

impl Loan {
    pub fn from_entity(entity: entity::loan::Model, total_paid: i64) -> Self {
        Self {
            id: entity.id,
            loan_code: entity.loan_code,
            customer_id: entity.customer_id,
            item_id: entity.item_id,
            loan_amount: entity.loan_amount,
            interest_rate: entity.interest_rate,
            term_days: entity.term_days,
            start_date: entity.start_date,
            due_date: entity.due_date,
            status: entity.status,
            collateral_description: entity.collateral_description,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            total_paid,
        }
    }

    pub fn interest(&self) -> i64 {
        flat_interest(self.loan_amount, self.interest_rate)
    }

    pub fn total_amount_due(&self) -> i64 {
        self.loan_amount + self.interest()
    }

    /// Outstanding amount, never negative.
    pub fn remaining_balance(&self) -> i64 {
        (self.total_amount_due() - self.total_paid).max(0)
    }

    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days().max(0)
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.due_date < today
    }

    pub fn into_dto(self) -> LoanDto {
        let today = today();

        LoanDto {
            interest: self.interest(),
            total_amount_due: self.total_amount_due(),
            remaining_balance: self.remaining_balance(),
            days_remaining: self.days_remaining(today),
            days_overdue: self.days_overdue(today),
            is_overdue: self.is_overdue(today),
            id: self.id,
            loan_code: self.loan_code,
            customer_id: self.customer_id,
            item_id: self.item_id,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate,
            term_days: self.term_days,
            start_date: self.start_date,
            due_date: self.due_date,
            status: self.status,
            collateral_description: self.collateral_description,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
            total_paid: self.total_paid,
        }
    }
}

/// Loan together with its customer, collateral item and payment history.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanDetails {
    pub loan: Loan,
    pub customer: Customer,
    pub item: Item,
    /// Newest first.
    pub payments: Vec<Payment>,
}

impl LoanDetails {
    pub fn into_dto(self) -> LoanDetailDto {
        LoanDetailDto {
            loan: self.loan.into_dto(),
            customer_name: self.customer.full_name(),
            customer_phone: self.customer.phone,
            item_name: self.item.name,
            item_category: self.item.category,
            payments: self.payments.into_iter().map(|p| p.into_dto()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoanParams {
    pub customer_id: i32,
    pub item_id: i32,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_days: i32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
    pub collateral_description: Option<String>,
    pub notes: Option<String>,
    pub initial_payment: Option<i64>,
    pub payment_method: PaymentMethod,
}

impl CreateLoanParams {
    /// Fills in the start date (today), due date (`start + term_days`) and status
    /// (`pending`) when the request leaves them out.
    ///
    /// # Returns
    /// - `Ok(CreateLoanParams)` - Params with every date resolved
    /// - `Err(String)` - `term_days` is not positive or pushes the due date past the calendar
    pub fn from_dto(dto: CreateLoanDto) -> Result<Self, String> {
        if dto.term_days <= 0 {
            return Err("Term days must be greater than zero".to_string());
        }

        let start_date = dto.start_date.unwrap_or_else(today);
        let due_date = match dto.due_date {
            Some(due_date) => due_date,
            None => add_days(start_date, dto.term_days)
                .ok_or_else(|| format!("Loan term of {} days is out of range", dto.term_days))?,
        };

        Ok(Self {
            customer_id: dto.customer_id,
            item_id: dto.item_id,
            loan_amount: dto.loan_amount,
            interest_rate: dto.interest_rate,
            term_days: dto.term_days,
            start_date,
            due_date,
            status: dto.status.unwrap_or(LoanStatus::Pending),
            collateral_description: dto.collateral_description,
            notes: dto.notes,
            initial_payment: dto.initial_payment,
            payment_method: dto.payment_method.unwrap_or(PaymentMethod::Cash),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateLoanParams {
    pub loan_amount: Option<i64>,
    pub interest_rate: Option<f64>,
    pub term_days: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
    pub collateral_description: Option<String>,
    pub notes: Option<String>,
}

impl UpdateLoanParams {
    pub fn from_dto(dto: UpdateLoanDto) -> Self {
        Self {
            loan_amount: dto.loan_amount,
            interest_rate: dto.interest_rate,
            term_days: dto.term_days,
            due_date: dto.due_date,
            status: dto.status,
            collateral_description: dto.collateral_description,
            notes: dto.notes,
        }
    }
}

/// Filters shared by the loan list and search endpoints.
#[derive(Debug, Clone, Default)]
pub struct LoanFilter {
    /// Matches loan code or notes.
    pub search_term: Option<String>,
    pub status: Option<LoanStatus>,
    pub customer_id: Option<i32>,
    pub item_id: Option<i32>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub due_date_from: Option<NaiveDate>,
    pub due_date_to: Option<NaiveDate>,
    pub is_overdue: Option<bool>,
}

impl LoanFilter {
    pub fn from_search_dto(dto: LoanSearchDto) -> Self {
        Self {
            search_term: dto.search_term,
            status: dto.status,
            customer_id: dto.customer_id,
            item_id: dto.item_id,
            min_amount: dto.min_amount,
            max_amount: dto.max_amount,
            start_date_from: dto.start_date_from,
            start_date_to: dto.start_date_to,
            due_date_from: dto.due_date_from,
            due_date_to: dto.due_date_to,
            is_overdue: dto.is_overdue,
        }
    }
}

/// `Invalid loan status transition from {from} to {to}`
pub fn invalid_transition_message(from: LoanStatus, to: LoanStatus) -> String {
    format!(
        "Invalid loan status transition from {} to {}",
        from.to_value(),
        to.to_value()
    )
}
