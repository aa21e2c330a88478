use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(pk_auto(Customer::Id))
                    .col(string_len_uniq(Customer::CustomerCode, 16))
                    .col(string(Customer::FirstName))
                    .col(string(Customer::LastName))
                    .col(string_null(Customer::Email).unique_key())
                    .col(string_uniq(Customer::Phone))
                    .col(string_null(Customer::Address))
                    .col(string_null(Customer::City))
                    .col(string_null(Customer::State))
                    .col(string_null(Customer::ZipCode))
                    .col(string_null(Customer::IdType))
                    .col(string_null(Customer::IdNumber))
                    .col(date_null(Customer::DateOfBirth))
                    .col(text_null(Customer::Notes))
                    .col(boolean(Customer::IsActive).default(true))
                    .col(integer_null(Customer::CreditScore))
                    .col(
                        timestamp_with_time_zone(Customer::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Customer::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_last_name")
                    .table(Customer::Table)
                    .col(Customer::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Customer {
    #[sea_orm(iden = "customers")]
    Table,
    Id,
    CustomerCode,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    IdType,
    IdNumber,
    DateOfBirth,
    Notes,
    IsActive,
    CreditScore,
    CreatedAt,
    UpdatedAt,
}
