//! Employee factory.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test employees linked to an existing user, branch and type.
pub struct EmployeeFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    branch_id: i32,
    employee_type_id: i32,
    hire_date: Option<NaiveDate>,
}

impl<'a> EmployeeFactory<'a> {
    /// Creates a new EmployeeFactory hired today.
    pub fn new(
        db: &'a DatabaseConnection,
        user_id: i32,
        branch_id: i32,
        employee_type_id: i32,
    ) -> Self {
        Self {
            db,
            user_id,
            branch_id,
            employee_type_id,
            hire_date: Some(Utc::now().date_naive()),
        }
    }

    pub fn hire_date(mut self, hire_date: Option<NaiveDate>) -> Self {
        self.hire_date = hire_date;
        self
    }

    /// Builds and inserts the employee entity into the database.
    pub async fn build(self) -> Result<entity::employee::Model, DbErr> {
        entity::employee::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            branch_id: ActiveValue::Set(self.branch_id),
            employee_type_id: ActiveValue::Set(self.employee_type_id),
            hire_date: ActiveValue::Set(self.hire_date),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an employee hired today.
pub async fn create_employee(
    db: &DatabaseConnection,
    user_id: i32,
    branch_id: i32,
    employee_type_id: i32,
) -> Result<entity::employee::Model, DbErr> {
    EmployeeFactory::new(db, user_id, branch_id, employee_type_id)
        .build()
        .await
}
