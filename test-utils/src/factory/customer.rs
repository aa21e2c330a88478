//! Customer factory for creating test customer entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test customers with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let customer = CustomerFactory::new(&db)
///     .first_name("Ada")
///     .email(Some("ada@example.com".to_string()))
///     .build()
///     .await?;
/// ```
pub struct CustomerFactory<'a> {
    db: &'a DatabaseConnection,
    customer_code: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: String,
    city: Option<String>,
    is_active: bool,
}

impl<'a> CustomerFactory<'a> {
    /// Creates a new CustomerFactory with default values.
    ///
    /// Defaults:
    /// - customer_code: `"C-{id:08X}"`
    /// - email: `"customer{id}@example.com"`
    /// - phone: `"555-{id:07}"`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            customer_code: format!("C-{:08X}", id),
            first_name: "Jane".to_string(),
            last_name: format!("Doe{}", id),
            email: Some(format!("customer{}@example.com", id)),
            phone: format!("555-{:07}", id),
            city: Some("Springfield".to_string()),
            is_active: true,
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
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

    /// Builds and inserts the customer entity into the database.
    pub async fn build(self) -> Result<entity::customer::Model, DbErr> {
        entity::customer::ActiveModel {
            customer_code: ActiveValue::Set(self.customer_code),
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            email: ActiveValue::Set(self.email),
            phone: ActiveValue::Set(self.phone),
            address: ActiveValue::Set(None),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(None),
            zip_code: ActiveValue::Set(None),
            id_type: ActiveValue::Set(None),
            id_number: ActiveValue::Set(None),
            date_of_birth: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            credit_score: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a customer with default values.
pub async fn create_customer(db: &DatabaseConnection) -> Result<entity::customer::Model, DbErr> {
    CustomerFactory::new(db).build().await
}
