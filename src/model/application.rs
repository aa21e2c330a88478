use chrono::{DateTime, NaiveDate, Utc};
use entity::{application::ApplicationStatus, item::ItemCategory};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ApplicationDto {
    pub id: i32,
    pub application_number: String,
    pub customer_id: i32,
    pub branch_id: i32,
    #[schema(value_type = String)]
    pub item_category: ItemCategory,
    pub item_description: String,
    pub estimated_value: i64,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_months: i32,
    #[schema(value_type = String)]
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub processed_by_id: Option<i32>,
    pub processed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateApplicationDto {
    pub customer_id: i32,
    pub branch_id: i32,
    #[schema(value_type = String)]
    pub item_category: ItemCategory,
    pub item_description: String,
    pub estimated_value: i64,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_months: i32,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateApplicationDto {
    #[schema(value_type = Option<String>)]
    pub item_category: Option<ItemCategory>,
    pub item_description: Option<String>,
    pub estimated_value: Option<i64>,
    pub loan_amount: Option<i64>,
    pub interest_rate: Option<f64>,
    pub term_months: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

/// Filters, sorting and paging accepted by the application list and export endpoints.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
pub struct ApplicationQueryDto {
    #[param(value_type = Option<String>)]
    pub status: Option<ApplicationStatus>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    #[param(value_type = Option<String>)]
    pub item_category: Option<ItemCategory>,
    pub min_estimated_value: Option<i64>,
    pub max_estimated_value: Option<i64>,
    pub min_loan_amount: Option<i64>,
    pub max_loan_amount: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Matches application number, item description or notes.
    pub search: Option<String>,
    /// One of `created_at`, `updated_at`, `application_number`, `estimated_value`, `loan_amount`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
    #[serde(default)]
    pub page: u64,
    pub entries: Option<u64>,
    /// Export only: `csv` (default) or `json`.
    pub format: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct BulkUpdateApplicationsDto {
    pub application_ids: Vec<i32>,
    #[schema(value_type = String)]
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BulkUpdateResultDto {
    pub updated_count: u64,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct BulkDeleteApplicationsDto {
    pub application_ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BulkDeleteResultDto {
    pub deleted_count: u64,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ApplicationStatsDto {
    pub total_applications: u64,
    pub pending_count: u64,
    pub approved_count: u64,
    pub rejected_count: u64,
    pub cancelled_count: u64,
    pub total_value: i64,
    pub total_loan_amount: i64,
    pub average_loan_amount: f64,
    pub average_interest_rate: f64,
    pub average_term_months: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ApplicationTrendDto {
    pub date: NaiveDate,
    pub count: u64,
    pub total_value: i64,
    pub total_loan_amount: i64,
}
