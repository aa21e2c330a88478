//! Shared helper utilities for factory methods.
//!
//! Provides ID generation used across all factories and convenience methods
//! for creating entities together with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a loan together with everything it depends on.
///
/// Creates, with default values:
/// 1. Branch
/// 2. Customer
/// 3. Item (status `pawned`) held at the branch for the customer
/// 4. Loan (status `active`) against the item
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((branch, customer, item, loan))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_loan_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::branch::Model,
        entity::customer::Model,
        entity::item::Model,
        entity::loan::Model,
    ),
    DbErr,
> {
    let branch = crate::factory::branch::create_branch(db).await?;
    let customer = crate::factory::customer::create_customer(db).await?;
    let item = crate::factory::item::ItemFactory::new(db, branch.id)
        .customer_id(Some(customer.id))
        .status(entity::item::ItemStatus::Pawned)
        .build()
        .await?;
    let loan = crate::factory::loan::create_loan(db, customer.id, item.id).await?;

    Ok((branch, customer, item, loan))
}

/// Creates an employee together with its user, branch and employee type.
///
/// # Returns
/// - `Ok((user, branch, employee_type, employee))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_employee_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::branch::Model,
        entity::employee_type::Model,
        entity::employee::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let branch = crate::factory::branch::create_branch(db).await?;
    let employee_type = crate::factory::employee_type::create_employee_type(db).await?;
    let employee =
        crate::factory::employee::create_employee(db, user.id, branch.id, employee_type.id)
            .await?;

    Ok((user, branch, employee_type, employee))
}
