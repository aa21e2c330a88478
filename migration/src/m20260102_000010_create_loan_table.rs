use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260102_000008_create_customer_table::Customer, m20260102_000009_create_item_table::Item,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Loan::Table)
                    .if_not_exists()
                    .col(pk_auto(Loan::Id))
                    .col(string_len_uniq(Loan::LoanCode, 16))
                    .col(integer(Loan::CustomerId))
                    .col(integer(Loan::ItemId))
                    .col(big_integer(Loan::LoanAmount))
                    .col(double(Loan::InterestRate))
                    .col(integer(Loan::TermDays))
                    .col(date(Loan::StartDate))
                    .col(date(Loan::DueDate))
                    .col(string_len(Loan::Status, 32).default("pending"))
                    .col(text_null(Loan::CollateralDescription))
                    .col(text_null(Loan::Notes))
                    .col(
                        timestamp_with_time_zone(Loan::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Loan::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_customer_id")
                            .from(Loan::Table, Loan::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_item_id")
                            .from(Loan::Table, Loan::ItemId)
                            .to(Item::Table, Item::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_loan_status_due_date")
                    .table(Loan::Table)
                    .col(Loan::Status)
                    .col(Loan::DueDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Loan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Loan {
    #[sea_orm(iden = "loans")]
    Table,
    Id,
    LoanCode,
    CustomerId,
    ItemId,
    LoanAmount,
    InterestRate,
    TermDays,
    StartDate,
    DueDate,
    Status,
    CollateralDescription,
    Notes,
    CreatedAt,
    UpdatedAt,
}
