//! Employee type factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an employee type with the given name.
pub async fn create_employee_type_named(
    db: &DatabaseConnection,
    name: impl Into<String>,
) -> Result<entity::employee_type::Model, DbErr> {
    entity::employee_type::ActiveModel {
        name: ActiveValue::Set(name.into()),
        description: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        updated_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates an employee type with a unique generated name.
pub async fn create_employee_type(
    db: &DatabaseConnection,
) -> Result<entity::employee_type::Model, DbErr> {
    create_employee_type_named(db, format!("Type {}", next_id())).await
}
