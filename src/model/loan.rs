use chrono::{DateTime, NaiveDate, Utc};
use entity::{item::ItemCategory, loan::LoanStatus, payment::PaymentMethod};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::model::{item::ItemDto, payment::PaymentDto};

/// A loan with its balance figures computed at read time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LoanDto {
    pub id: i32,
    pub loan_code: String,
    pub customer_id: i32,
    pub item_id: i32,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_days: i32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    #[schema(value_type = String)]
    pub status: LoanStatus,
    pub collateral_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub interest: i64,
    pub total_amount_due: i64,
    pub total_paid: i64,
    pub remaining_balance: i64,
    pub days_remaining: i64,
    pub days_overdue: i64,
    pub is_overdue: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LoanDetailDto {
    #[serde(flatten)]
    pub loan: LoanDto,
    pub customer_name: String,
    pub customer_phone: String,
    pub item_name: String,
    #[schema(value_type = String)]
    pub item_category: ItemCategory,
    /// Newest first.
    pub payments: Vec<PaymentDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateLoanDto {
    pub customer_id: i32,
    pub item_id: i32,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_days: i32,
    /// Defaults to today.
    pub start_date: Option<NaiveDate>,
    /// Defaults to `start_date + term_days`.
    pub due_date: Option<NaiveDate>,
    /// Defaults to `pending`.
    #[schema(value_type = Option<String>)]
    pub status: Option<LoanStatus>,
    pub collateral_description: Option<String>,
    pub notes: Option<String>,
    pub initial_payment: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateLoanDto {
    pub loan_amount: Option<i64>,
    pub interest_rate: Option<f64>,
    pub term_days: Option<i32>,
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub status: Option<LoanStatus>,
    pub collateral_description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreatePaymentDto {
    pub amount: i64,
    #[serde(default = "default_payment_method")]
    #[schema(value_type = String)]
    pub payment_method: PaymentMethod,
    pub payment_date: Option<DateTime<Utc>>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ExtendLoanDto {
    pub additional_days: i32,
    /// Optional extension fee collected now, in cents.
    pub payment: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RedeemLoanDto {
    pub payment: i64,
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct DefaultLoanDto {
    pub default_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct LoanSearchDto {
    pub search_term: Option<String>,
    #[schema(value_type = Option<String>)]
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

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LoansByMonthDto {
    /// `YYYY-MM`
    pub month: String,
    pub count: u64,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LoanStatsDto {
    pub total_loans: u64,
    pub active_loans: u64,
    pub completed_loans: u64,
    pub defaulted_loans: u64,
    pub overdue_loans: u64,
    pub total_loan_amount: i64,
    pub total_interest_earned: i64,
    pub avg_loan_amount: f64,
    pub avg_loan_term: f64,
    pub loans_by_status: BTreeMap<String, u64>,
    /// Last twelve months, oldest first.
    pub loans_by_month: Vec<LoansByMonthDto>,
}

/// A loan together with the item securing it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CollateralDto {
    pub loan: LoanDto,
    pub item: ItemDto,
}

fn default_payment_method() -> PaymentMethod {
    PaymentMethod::Cash
}
