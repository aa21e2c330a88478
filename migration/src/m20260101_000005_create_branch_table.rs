use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Branch::Table)
                    .if_not_exists()
                    .col(pk_auto(Branch::Id))
                    .col(string(Branch::Name))
                    .col(string_null(Branch::Address))
                    .col(string_null(Branch::City))
                    .col(string_null(Branch::State))
                    .col(string_null(Branch::Phone))
                    .col(string_null(Branch::Email))
                    .col(boolean(Branch::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Branch::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Branch::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_branch_name")
                    .table(Branch::Table)
                    .col(Branch::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Branch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Branch {
    #[sea_orm(iden = "branches")]
    Table,
    Id,
    Name,
    Address,
    City,
    State,
    Phone,
    Email,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
