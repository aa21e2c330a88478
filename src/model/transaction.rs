use chrono::{DateTime, Utc};
use entity::{
    payment::PaymentMethod,
    transaction::{TransactionStatus, TransactionType},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::model::api::CountAmountDto;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TransactionDto {
    pub id: i32,
    pub transaction_code: String,
    #[schema(value_type = String)]
    pub transaction_type: TransactionType,
    pub amount: i64,
    #[schema(value_type = String)]
    pub payment_method: PaymentMethod,
    #[schema(value_type = String)]
    pub status: TransactionStatus,
    pub reference_number: Option<String>,
    pub customer_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub item_id: Option<i32>,
    pub branch_id: i32,
    pub transaction_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TransactionDetailDto {
    #[serde(flatten)]
    pub transaction: TransactionDto,
    pub customer_name: Option<String>,
    pub branch_name: Option<String>,
    pub item_name: Option<String>,
    pub loan_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateTransactionDto {
    #[schema(value_type = String)]
    pub transaction_type: TransactionType,
    pub amount: i64,
    #[schema(value_type = String)]
    pub payment_method: PaymentMethod,
    /// Defaults to `pending`.
    #[schema(value_type = Option<String>)]
    pub status: Option<TransactionStatus>,
    pub reference_number: Option<String>,
    pub customer_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub item_id: Option<i32>,
    pub branch_id: i32,
    /// Defaults to now.
    pub transaction_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateTransactionDto {
    #[schema(value_type = Option<String>)]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<PaymentMethod>,
    #[schema(value_type = Option<String>)]
    pub status: Option<TransactionStatus>,
    pub reference_number: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct CancelTransactionDto {
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct CompleteTransactionDto {
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct TransactionSearchDto {
    pub search_term: Option<String>,
    #[schema(value_type = Option<String>)]
    pub transaction_type: Option<TransactionType>,
    #[schema(value_type = Option<String>)]
    pub status: Option<TransactionStatus>,
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<PaymentMethod>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PeriodTotalDto {
    /// `YYYY-MM-DD` for daily totals, `YYYY-MM` for monthly totals.
    pub period: String,
    pub count: u64,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TransactionStatsDto {
    pub total_transactions: u64,
    /// Sum over completed transactions, in cents.
    pub total_amount: i64,
    pub by_type: BTreeMap<String, CountAmountDto>,
    pub by_status: BTreeMap<String, u64>,
    pub by_payment_method: BTreeMap<String, CountAmountDto>,
    /// Last 30 days, completed only.
    pub daily: Vec<PeriodTotalDto>,
    /// Last 12 months, completed only.
    pub monthly: Vec<PeriodTotalDto>,
}
