//! Branch factory for creating test branch entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test branches with customizable fields.
pub struct BranchFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    city: Option<String>,
    is_active: bool,
}

impl<'a> BranchFactory<'a> {
    /// Creates a new BranchFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Branch {id}"`
    /// - city: `Some("Springfield")`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Branch {}", id),
            city: Some("Springfield".to_string()),
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn city(mut self, city: Option<String>) -> Self {
        self.city = city;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the branch entity into the database.
    pub async fn build(self) -> Result<entity::branch::Model, DbErr> {
        entity::branch::ActiveModel {
            name: ActiveValue::Set(self.name),
            address: ActiveValue::Set(Some("1 Main Street".to_string())),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(Some("IL".to_string())),
            phone: ActiveValue::Set(None),
            email: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a branch with default values.
pub async fn create_branch(db: &DatabaseConnection) -> Result<entity::branch::Model, DbErr> {
    BranchFactory::new(db).build().await
}
