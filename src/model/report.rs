use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::model::{
    api::{CountAmountDto, MonthCountDto},
    customer::TopCustomerDto,
    item::ItemDto,
};

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
pub struct ReportRangeQueryDto {
    /// Defaults to 30 days before `end_date`.
    pub start_date: Option<NaiveDate>,
    /// Defaults to today.
    pub end_date: Option<NaiveDate>,
    pub branch_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DailyAmountDto {
    pub date: NaiveDate,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DailyCountDto {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DailyCountAmountDto {
    pub date: NaiveDate,
    pub count: u64,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BranchTotalDto {
    pub branch_id: i32,
    pub branch_name: String,
    pub count: u64,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TopItemDto {
    pub item_id: i32,
    pub item_name: String,
    pub category: String,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DashboardDto {
    pub total_loans: u64,
    pub active_loans: u64,
    pub overdue_loans: u64,
    pub defaulted_loans: u64,
    pub total_loan_amount: i64,
    pub total_interest_earned: i64,
    pub total_sales: i64,
    pub sales_today: i64,
    pub total_inventory_value: i64,
    pub total_customers: u64,
    pub new_customers_this_month: u64,
    pub revenue_by_day: Vec<DailyAmountDto>,
    pub loan_applications_by_day: Vec<DailyCountDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct SalesReportDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_sales: i64,
    pub transaction_count: u64,
    pub average_sale: f64,
    pub sales_by_date: Vec<DailyAmountDto>,
    pub sales_by_payment_method: BTreeMap<String, CountAmountDto>,
    pub sales_by_branch: Vec<BranchTotalDto>,
    pub top_items: Vec<TopItemDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LoanReportDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_loans: u64,
    pub total_amount: i64,
    pub by_status: BTreeMap<String, CountAmountDto>,
    pub interest_collected: i64,
    pub loans_by_date: Vec<DailyCountAmountDto>,
    pub loans_by_branch: Vec<BranchTotalDto>,
    pub average_loan_amount: f64,
    pub average_term_days: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct InventoryReportDto {
    pub total_items: u64,
    pub total_value: i64,
    pub by_status: BTreeMap<String, CountAmountDto>,
    pub by_category: BTreeMap<String, CountAmountDto>,
    pub by_branch: Vec<BranchTotalDto>,
    pub recent_items: Vec<ItemDto>,
    pub highest_value_items: Vec<ItemDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CustomerReportDto {
    pub total_customers: u64,
    pub active: u64,
    pub inactive: u64,
    pub new_last_30_days: u64,
    pub top_by_loan_amount: Vec<TopCustomerDto>,
    /// Last twelve months, oldest first.
    pub monthly_acquisition: Vec<MonthCountDto>,
}
