use sea_orm_migration::{prelude::*, schema::*};

use super::m20260102_000010_create_loan_table::Loan;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::LoanId))
                    .col(big_integer(Payment::Amount))
                    .col(timestamp_with_time_zone(Payment::PaymentDate))
                    .col(string_len(Payment::PaymentMethod, 32))
                    .col(string_null(Payment::ReferenceNumber))
                    .col(text_null(Payment::Notes))
                    .col(
                        timestamp_with_time_zone(Payment::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Payment::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_loan_id")
                            .from(Payment::Table, Payment::LoanId)
                            .to(Loan::Table, Loan::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    LoanId,
    Amount,
    PaymentDate,
    PaymentMethod,
    ReferenceNumber,
    Notes,
    CreatedAt,
    UpdatedAt,
}
