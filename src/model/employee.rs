use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EmployeeTypeDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateEmployeeTypeDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateEmployeeTypeDto {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Employee record joined with its user, branch and type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EmployeeDto {
    pub id: i32,
    pub user_id: i32,
    pub branch_id: i32,
    pub employee_type_id: i32,
    pub hire_date: Option<NaiveDate>,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub branch_name: String,
    pub employee_type_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateEmployeeDto {
    pub user_id: i32,
    pub branch_id: i32,
    pub employee_type_id: i32,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateEmployeeDto {
    pub branch_id: Option<i32>,
    pub employee_type_id: Option<i32>,
    pub hire_date: Option<NaiveDate>,
    /// Written through to the linked user account.
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct EmployeeSearchDto {
    pub search_term: Option<String>,
    pub branch_id: Option<i32>,
    pub employee_type_id: Option<i32>,
    pub is_active: Option<bool>,
    pub hire_date_from: Option<NaiveDate>,
    pub hire_date_to: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EmployeesByBranchDto {
    pub branch_id: i32,
    pub branch_name: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EmployeesByTypeDto {
    pub employee_type_id: i32,
    pub employee_type_name: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EmployeesByHireMonthDto {
    pub month: u32,
    pub month_name: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EmployeeStatsDto {
    pub total_employees: u64,
    pub active_employees: u64,
    pub employees_by_branch: Vec<EmployeesByBranchDto>,
    pub employees_by_type: Vec<EmployeesByTypeDto>,
    /// Twelve entries covering the current year.
    pub employees_by_hire_month: Vec<EmployeesByHireMonthDto>,
}
