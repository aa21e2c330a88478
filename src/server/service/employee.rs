use std::collections::HashMap;

use chrono::Datelike;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::employee::{
        EmployeeStatsDto, EmployeesByBranchDto, EmployeesByHireMonthDto, EmployeesByTypeDto,
    },
    server::{
        data::{
            branch::BranchRepository, employee::EmployeeRepository,
            employee_type::EmployeeTypeRepository, user::UserRepository,
        },
        error::AppError,
        model::{
            employee::{
                CreateEmployeeParams, CreateEmployeeTypeParams, EmployeeDetails, EmployeeFilter,
                EmployeeType, UpdateEmployeeParams, UpdateEmployeeTypeParams,
            },
            Paginated,
        },
        util::time::{month_name, today},
    },
};

pub struct EmployeeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_types(&self) -> Result<Vec<EmployeeType>, AppError> {
        Ok(EmployeeTypeRepository::new(self.db).get_all().await?)
    }

    pub async fn get_type(&self, id: i32) -> Result<EmployeeType, AppError> {
        EmployeeTypeRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(type_not_found)
    }

    pub async fn create_type(
        &self,
        params: CreateEmployeeTypeParams,
    ) -> Result<EmployeeType, AppError> {
        let repo = EmployeeTypeRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(duplicate_type_name());
        }

        Ok(repo.create(params).await?)
    }

    pub async fn update_type(
        &self,
        id: i32,
        params: UpdateEmployeeTypeParams,
    ) -> Result<EmployeeType, AppError> {
        let repo = EmployeeTypeRepository::new(self.db);
        let existing = self.get_type(id).await?;

        if let Some(name) = &params.name {
            if *name != existing.name && repo.find_by_name(name).await?.is_some() {
                return Err(duplicate_type_name());
            }
        }

        repo.update(id, params).await?.ok_or_else(type_not_found)
    }

    pub async fn delete_type(&self, id: i32) -> Result<EmployeeType, AppError> {
        let repo = EmployeeTypeRepository::new(self.db);
        let employee_type = self.get_type(id).await?;

        let assigned = repo.count_employees(id).await?;
        if assigned > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete employee type that is assigned to {} employees",
                assigned
            )));
        }

        repo.delete(id).await?;

        Ok(employee_type)
    }

    pub async fn get_paginated(
        &self,
        filter: &EmployeeFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<EmployeeDetails>, AppError> {
        let (employees, total) = EmployeeRepository::new(self.db)
            .get_all_paginated(filter, page, per_page)
            .await?;

        Ok(Paginated::new(employees, total, page, per_page))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<EmployeeDetails, AppError> {
        EmployeeRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    /// Creates the employee record for an existing user.
    ///
    /// # Returns
    /// - `Ok(EmployeeDetails)` - The created employee
    /// - `Err(AppError::NotFound)` - Unknown user, branch or employee type
    /// - `Err(AppError::BadRequest)` - The user already has an employee record
    pub async fn create(&self, params: CreateEmployeeParams) -> Result<EmployeeDetails, AppError> {
        if UserRepository::new(self.db)
            .find_by_id(params.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        self.ensure_references(Some(params.branch_id), Some(params.employee_type_id))
            .await?;

        let repo = EmployeeRepository::new(self.db);
        if repo.exists_for_user(params.user_id).await? {
            return Err(AppError::BadRequest(
                "Employee record already exists for this user".to_string(),
            ));
        }

        Ok(repo.create(params).await?)
    }

    /// Updates an employee. `is_active` is written to the linked user account.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateEmployeeParams,
    ) -> Result<EmployeeDetails, AppError> {
        let existing = self.get_by_id(id).await?;
        self.ensure_references(params.branch_id, params.employee_type_id)
            .await?;

        let txn = self.db.begin().await?;
        let employee_repo = EmployeeRepository::new(&txn);
        employee_repo.update(id, &params).await?;
        if let Some(is_active) = params.is_active {
            UserRepository::new(&txn)
                .set_active(existing.user_id, is_active)
                .await?;
        }
        let updated = employee_repo.find_by_id(id).await?;
        txn.commit().await?;

        updated.ok_or_else(not_found)
    }

    /// Removes the employee record and deactivates the linked user.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let existing = self.get_by_id(id).await?;

        let txn = self.db.begin().await?;
        UserRepository::new(&txn)
            .set_active(existing.user_id, false)
            .await?;
        EmployeeRepository::new(&txn).delete(id).await?;
        txn.commit().await?;

        tracing::info!("Removed employee {} ({})", id, existing.username);

        Ok(())
    }

    pub async fn stats(&self) -> Result<EmployeeStatsDto, AppError> {
        let employees = EmployeeRepository::new(self.db).get_all().await?;
        let year = today().year();

        let mut by_branch: HashMap<i32, (String, u64)> = HashMap::new();
        let mut by_type: HashMap<i32, (String, u64)> = HashMap::new();
        let mut by_month = [0u64; 12];

        for employee in &employees {
            by_branch
                .entry(employee.branch_id)
                .or_insert_with(|| (employee.branch_name.clone(), 0))
                .1 += 1;
            by_type
                .entry(employee.employee_type_id)
                .or_insert_with(|| (employee.employee_type_name.clone(), 0))
                .1 += 1;
            if let Some(hire_date) = employee.hire_date {
                if hire_date.year() == year {
                    by_month[hire_date.month0() as usize] += 1;
                }
            }
        }

        let mut employees_by_branch: Vec<EmployeesByBranchDto> = by_branch
            .into_iter()
            .map(|(branch_id, (branch_name, count))| EmployeesByBranchDto {
                branch_id,
                branch_name,
                count,
            })
            .collect();
        employees_by_branch.sort_by(|a, b| a.branch_name.cmp(&b.branch_name));

        let mut employees_by_type: Vec<EmployeesByTypeDto> = by_type
            .into_iter()
            .map(|(employee_type_id, (employee_type_name, count))| EmployeesByTypeDto {
                employee_type_id,
                employee_type_name,
                count,
            })
            .collect();
        employees_by_type.sort_by(|a, b| a.employee_type_name.cmp(&b.employee_type_name));

        let employees_by_hire_month = (1..=12u32)
            .map(|month| EmployeesByHireMonthDto {
                month,
                month_name: month_name(month).to_string(),
                count: by_month[(month - 1) as usize],
            })
            .collect();

        Ok(EmployeeStatsDto {
            total_employees: employees.len() as u64,
            active_employees: employees.iter().filter(|e| e.is_active).count() as u64,
            employees_by_branch,
            employees_by_type,
            employees_by_hire_month,
        })
    }

    async fn ensure_references(
        &self,
        branch_id: Option<i32>,
        employee_type_id: Option<i32>,
    ) -> Result<(), AppError> {
        if let Some(branch_id) = branch_id {
            if BranchRepository::new(self.db)
                .find_by_id(branch_id)
                .await?
                .is_none()
            {
                return Err(AppError::NotFound("Branch not found".to_string()));
            }
        }

        if let Some(employee_type_id) = employee_type_id {
            self.get_type(employee_type_id).await?;
        }

        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Employee not found".to_string())
}

fn type_not_found() -> AppError {
    AppError::NotFound("Employee type not found".to_string())
}

fn duplicate_type_name() -> AppError {
    AppError::BadRequest("Employee type with this name already exists".to_string())
}
