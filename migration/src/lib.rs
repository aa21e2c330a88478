pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_role_table;
mod m20260101_000002_create_permission_table;
mod m20260101_000003_create_role_permission_table;
mod m20260101_000004_create_user_table;
mod m20260101_000005_create_branch_table;
mod m20260101_000006_create_employee_type_table;
mod m20260101_000007_create_employee_table;
mod m20260102_000008_create_customer_table;
mod m20260102_000009_create_item_table;
mod m20260102_000010_create_loan_table;
mod m20260102_000011_create_payment_table;
mod m20260102_000012_create_transaction_table;
mod m20260103_000013_create_application_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_role_table::Migration),
            Box::new(m20260101_000002_create_permission_table::Migration),
            Box::new(m20260101_000003_create_role_permission_table::Migration),
            Box::new(m20260101_000004_create_user_table::Migration),
            Box::new(m20260101_000005_create_branch_table::Migration),
            Box::new(m20260101_000006_create_employee_type_table::Migration),
            Box::new(m20260101_000007_create_employee_table::Migration),
            Box::new(m20260102_000008_create_customer_table::Migration),
            Box::new(m20260102_000009_create_item_table::Migration),
            Box::new(m20260102_000010_create_loan_table::Migration),
            Box::new(m20260102_000011_create_payment_table::Migration),
            Box::new(m20260102_000012_create_transaction_table::Migration),
            Box::new(m20260103_000013_create_application_table::Migration),
        ]
    }
}
