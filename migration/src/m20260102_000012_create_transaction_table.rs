use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000005_create_branch_table::Branch, m20260101_000007_create_employee_table::Employee,
    m20260102_000008_create_customer_table::Customer, m20260102_000009_create_item_table::Item,
    m20260102_000010_create_loan_table::Loan,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(pk_auto(Transaction::Id))
                    .col(string_len_uniq(Transaction::TransactionCode, 16))
                    .col(string_len(Transaction::TransactionType, 32))
                    .col(big_integer(Transaction::Amount))
                    .col(string_len(Transaction::PaymentMethod, 32))
                    .col(string_len(Transaction::Status, 32).default("pending"))
                    .col(string_null(Transaction::ReferenceNumber))
                    .col(integer_null(Transaction::CustomerId))
                    .col(integer_null(Transaction::EmployeeId))
                    .col(integer_null(Transaction::LoanId))
                    .col(integer_null(Transaction::ItemId))
                    .col(integer(Transaction::BranchId))
                    .col(timestamp_with_time_zone(Transaction::TransactionDate))
                    .col(text_null(Transaction::Notes))
                    .col(
                        timestamp_with_time_zone(Transaction::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Transaction::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_customer_id")
                            .from(Transaction::Table, Transaction::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_employee_id")
                            .from(Transaction::Table, Transaction::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_loan_id")
                            .from(Transaction::Table, Transaction::LoanId)
                            .to(Loan::Table, Loan::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_item_id")
                            .from(Transaction::Table, Transaction::ItemId)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_branch_id")
                            .from(Transaction::Table, Transaction::BranchId)
                            .to(Branch::Table, Branch::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_date")
                    .table(Transaction::Table)
                    .col(Transaction::TransactionDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Transaction {
    #[sea_orm(iden = "transactions")]
    Table,
    Id,
    TransactionCode,
    TransactionType,
    Amount,
    PaymentMethod,
    Status,
    ReferenceNumber,
    CustomerId,
    EmployeeId,
    LoanId,
    ItemId,
    BranchId,
    TransactionDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}
