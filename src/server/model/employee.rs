//! Employee and employee type domain models.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::employee::{
    CreateEmployeeDto, CreateEmployeeTypeDto, EmployeeDto, EmployeeSearchDto, EmployeeTypeDto,
    UpdateEmployeeDto, UpdateEmployeeTypeDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmployeeType {
    pub fn from_entity(entity: entity::employee_type::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> EmployeeTypeDto {
        EmployeeTypeDto {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateEmployeeTypeParams {
    pub name: String,
    pub description: Option<String>,
}

impl CreateEmployeeTypeParams {
    pub fn from_dto(dto: CreateEmployeeTypeDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeTypeParams {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateEmployeeTypeParams {
    pub fn from_dto(dto: UpdateEmployeeTypeDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Employee row enriched with its user account, branch and type.
///
/// `is_active` belongs to the linked user; employees have no activity flag of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDetails {
    pub id: i32,
    pub user_id: i32,
    pub branch_id: i32,
    pub employee_type_id: i32,
    pub hire_date: Option<NaiveDate>,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub branch_name: String,
    pub employee_type_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmployeeDetails {
    /// Assembles details from an employee and its related rows.
    ///
    /// Missing related rows fall back to empty names rather than failing, since the
    /// foreign keys make them unreachable in practice.
    pub fn from_entities(
        employee: entity::employee::Model,
        user: Option<&entity::user::Model>,
        branch: Option<&entity::branch::Model>,
        employee_type: Option<&entity::employee_type::Model>,
    ) -> Self {
        Self {
            id: employee.id,
            user_id: employee.user_id,
            branch_id: employee.branch_id,
            employee_type_id: employee.employee_type_id,
            hire_date: employee.hire_date,
            username: user.map(|u| u.username.clone()).unwrap_or_default(),
            email: user.map(|u| u.email.clone()).unwrap_or_default(),
            first_name: user.and_then(|u| u.first_name.clone()),
            last_name: user.and_then(|u| u.last_name.clone()),
            is_active: user.map(|u| u.is_active).unwrap_or(false),
            branch_name: branch.map(|b| b.name.clone()).unwrap_or_default(),
            employee_type_name: employee_type.map(|t| t.name.clone()).unwrap_or_default(),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }

    pub fn into_dto(self) -> EmployeeDto {
        EmployeeDto {
            id: self.id,
            user_id: self.user_id,
            branch_id: self.branch_id,
            employee_type_id: self.employee_type_id,
            hire_date: self.hire_date,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            branch_name: self.branch_name,
            employee_type_name: self.employee_type_name,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateEmployeeParams {
    pub user_id: i32,
    pub branch_id: i32,
    pub employee_type_id: i32,
    pub hire_date: Option<NaiveDate>,
}

impl CreateEmployeeParams {
    pub fn from_dto(dto: CreateEmployeeDto) -> Self {
        Self {
            user_id: dto.user_id,
            branch_id: dto.branch_id,
            employee_type_id: dto.employee_type_id,
            hire_date: dto.hire_date,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeParams {
    pub branch_id: Option<i32>,
    pub employee_type_id: Option<i32>,
    pub hire_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl UpdateEmployeeParams {
    pub fn from_dto(dto: UpdateEmployeeDto) -> Self {
        Self {
            branch_id: dto.branch_id,
            employee_type_id: dto.employee_type_id,
            hire_date: dto.hire_date,
            is_active: dto.is_active,
        }
    }
}

/// Filters shared by the employee list and search endpoints.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Matches username, email, first or last name of the linked user.
    pub search_term: Option<String>,
    pub branch_id: Option<i32>,
    pub employee_type_id: Option<i32>,
    pub is_active: Option<bool>,
    pub hire_date_from: Option<NaiveDate>,
    pub hire_date_to: Option<NaiveDate>,
}

impl EmployeeFilter {
    pub fn from_search_dto(dto: EmployeeSearchDto) -> Self {
        Self {
            search_term: dto.search_term,
            branch_id: dto.branch_id,
            employee_type_id: dto.employee_type_id,
            is_active: dto.is_active,
            hire_date_from: dto.hire_date_from,
            hire_date_to: dto.hire_date_to,
        }
    }
}
