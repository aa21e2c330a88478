use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CustomerDto {
    pub id: i32,
    pub customer_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub credit_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateCustomerDto {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub credit_score: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateCustomerDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
    pub credit_score: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct CustomerSearchDto {
    pub search_term: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer_code: Option<String>,
    pub is_active: Option<bool>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A customer ranked by borrowing activity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TopCustomerDto {
    pub customer_id: i32,
    pub customer_code: String,
    pub name: String,
    pub loan_count: u64,
    /// Cents.
    pub total_loan_amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CustomerStatsDto {
    pub total_customers: u64,
    pub active_customers: u64,
    pub inactive_customers: u64,
    pub customers_with_active_loans: u64,
    pub customers_with_completed_loans: u64,
    pub customers_with_defaulted_loans: u64,
    pub new_customers_this_month: u64,
    pub new_customers_this_year: u64,
    pub top_customers_by_loan_count: Vec<TopCustomerDto>,
    pub top_customers_by_loan_amount: Vec<TopCustomerDto>,
}
