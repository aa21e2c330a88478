use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000005_create_branch_table::Branch,
    m20260102_000008_create_customer_table::Customer,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(pk_auto(Item::Id))
                    .col(string_len_uniq(Item::ItemCode, 16))
                    .col(string(Item::Name))
                    .col(text_null(Item::Description))
                    .col(string_len(Item::Category, 32))
                    .col(string_len(Item::Status, 32))
                    .col(string_null(Item::SerialNumber))
                    .col(big_integer(Item::AppraisalValue))
                    .col(big_integer_null(Item::SellingPrice))
                    .col(string_null(Item::Condition))
                    .col(text_null(Item::Notes))
                    .col(integer_null(Item::CustomerId))
                    .col(integer(Item::BranchId))
                    .col(
                        timestamp_with_time_zone(Item::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Item::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_customer_id")
                            .from(Item::Table, Item::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_branch_id")
                            .from(Item::Table, Item::BranchId)
                            .to(Branch::Table, Branch::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_status")
                    .table(Item::Table)
                    .col(Item::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Item {
    #[sea_orm(iden = "items")]
    Table,
    Id,
    ItemCode,
    Name,
    Description,
    Category,
    Status,
    SerialNumber,
    AppraisalValue,
    SellingPrice,
    Condition,
    Notes,
    CustomerId,
    BranchId,
    CreatedAt,
    UpdatedAt,
}
