use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000004_create_user_table::User, m20260101_000005_create_branch_table::Branch,
    m20260101_000006_create_employee_type_table::EmployeeType,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(integer_uniq(Employee::UserId))
                    .col(integer(Employee::BranchId))
                    .col(integer(Employee::EmployeeTypeId))
                    .col(date_null(Employee::HireDate))
                    .col(
                        timestamp_with_time_zone(Employee::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Employee::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_user_id")
                            .from(Employee::Table, Employee::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_branch_id")
                            .from(Employee::Table, Employee::BranchId)
                            .to(Branch::Table, Branch::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_employee_type_id")
                            .from(Employee::Table, Employee::EmployeeTypeId)
                            .to(EmployeeType::Table, EmployeeType::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Employee {
    #[sea_orm(iden = "employees")]
    Table,
    Id,
    UserId,
    BranchId,
    EmployeeTypeId,
    HireDate,
    CreatedAt,
    UpdatedAt,
}
