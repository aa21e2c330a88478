use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmployeeType::Table)
                    .if_not_exists()
                    .col(pk_auto(EmployeeType::Id))
                    .col(string_len_uniq(EmployeeType::Name, 50))
                    .col(string_len_null(EmployeeType::Description, 255))
                    .col(
                        timestamp_with_time_zone(EmployeeType::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(EmployeeType::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmployeeType {
    #[sea_orm(iden = "employee_types")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
