//! Employee data repository.
//!
//! Employees are read as `EmployeeDetails`, which carry the linked user's name and
//! activity flag together with branch and type names. Related rows are loaded in
//! one query per table for a whole page rather than per employee.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::employee::{
    CreateEmployeeParams, EmployeeDetails, EmployeeFilter, UpdateEmployeeParams,
};

pub struct EmployeeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmployeeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateEmployeeParams) -> Result<EmployeeDetails, DbErr> {
        let entity = entity::employee::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            branch_id: ActiveValue::Set(params.branch_id),
            employee_type_id: ActiveValue::Set(params.employee_type_id),
            hire_date: ActiveValue::Set(params.hire_date),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut details = self.load_details(vec![entity]).await?;
        details
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound("Created employee not found".to_string()))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<EmployeeDetails>, DbErr> {
        let Some(entity) = entity::prelude::Employee::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.load_details(vec![entity]).await?.pop())
    }

    pub async fn exists_for_user(&self, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Employee::find()
            .filter(entity::employee::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of employees matching the filter, ordered by id.
    ///
    /// # Returns
    /// - `Ok((employees, total_items))` - Employees on the page and the number matching
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &EmployeeFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<EmployeeDetails>, u64), DbErr> {
        let mut condition = Condition::all();
        if let Some(branch_id) = filter.branch_id {
            condition = condition.add(entity::employee::Column::BranchId.eq(branch_id));
        }
        if let Some(employee_type_id) = filter.employee_type_id {
            condition = condition.add(entity::employee::Column::EmployeeTypeId.eq(employee_type_id));
        }
        if let Some(is_active) = filter.is_active {
            condition = condition.add(entity::user::Column::IsActive.eq(is_active));
        }
        if let Some(from) = filter.hire_date_from {
            condition = condition.add(entity::employee::Column::HireDate.gte(from));
        }
        if let Some(to) = filter.hire_date_to {
            condition = condition.add(entity::employee::Column::HireDate.lte(to));
        }
        if let Some(term) = &filter.search_term {
            condition = condition.add(
                Condition::any()
                    .add(entity::user::Column::Username.contains(term))
                    .add(entity::user::Column::Email.contains(term))
                    .add(entity::user::Column::FirstName.contains(term))
                    .add(entity::user::Column::LastName.contains(term)),
            );
        }

        let paginator = entity::prelude::Employee::find()
            .inner_join(entity::prelude::User)
            .filter(condition)
            .order_by_asc(entity::employee::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.load_details(entities).await?, total))
    }

    /// Gets every employee, used for statistics.
    pub async fn get_all(&self) -> Result<Vec<EmployeeDetails>, DbErr> {
        let entities = entity::prelude::Employee::find()
            .order_by_asc(entity::employee::Column::Id)
            .all(self.db)
            .await?;

        self.load_details(entities).await
    }

    pub async fn update(
        &self,
        id: i32,
        params: &UpdateEmployeeParams,
    ) -> Result<Option<EmployeeDetails>, DbErr> {
        let Some(employee) = entity::prelude::Employee::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::employee::ActiveModel = employee.into();
        if let Some(branch_id) = params.branch_id {
            active_model.branch_id = ActiveValue::Set(branch_id);
        }
        if let Some(employee_type_id) = params.employee_type_id {
            active_model.employee_type_id = ActiveValue::Set(employee_type_id);
        }
        if let Some(hire_date) = params.hire_date {
            active_model.hire_date = ActiveValue::Set(Some(hire_date));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(self.load_details(vec![entity]).await?.pop())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Employee::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn load_details(
        &self,
        employees: Vec<entity::employee::Model>,
    ) -> Result<Vec<EmployeeDetails>, DbErr> {
        if employees.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = employees.iter().map(|e| e.user_id).collect();
        let branch_ids: Vec<i32> = employees.iter().map(|e| e.branch_id).collect();
        let type_ids: Vec<i32> = employees.iter().map(|e| e.employee_type_id).collect();

        let users: HashMap<i32, entity::user::Model> = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let branches: HashMap<i32, entity::branch::Model> = entity::prelude::Branch::find()
            .filter(entity::branch::Column::Id.is_in(branch_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();
        let types: HashMap<i32, entity::employee_type::Model> =
            entity::prelude::EmployeeType::find()
                .filter(entity::employee_type::Column::Id.is_in(type_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect();

        Ok(employees
            .into_iter()
            .map(|employee| {
                let user = users.get(&employee.user_id);
                let branch = branches.get(&employee.branch_id);
                let employee_type = types.get(&employee.employee_type_id);
                EmployeeDetails::from_entities(employee, user, branch, employee_type)
            })
            .collect())
    }
}
