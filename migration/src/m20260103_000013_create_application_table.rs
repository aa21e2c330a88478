use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000004_create_user_table::User, m20260101_000005_create_branch_table::Branch,
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
                    .table(Application::Table)
                    .if_not_exists()
                    .col(pk_auto(Application::Id))
                    .col(string_len_uniq(Application::ApplicationNumber, 32))
                    .col(integer(Application::CustomerId))
                    .col(integer(Application::BranchId))
                    .col(string_len(Application::ItemCategory, 32))
                    .col(text(Application::ItemDescription))
                    .col(big_integer(Application::EstimatedValue))
                    .col(big_integer(Application::LoanAmount))
                    .col(double(Application::InterestRate))
                    .col(integer(Application::TermMonths))
                    .col(string_len(Application::Status, 32).default("pending"))
                    .col(text_null(Application::Notes))
                    .col(integer_null(Application::ProcessedById))
                    .col(timestamp_with_time_zone_null(Application::ProcessedAt))
                    .col(text_null(Application::RejectionReason))
                    .col(
                        timestamp_with_time_zone(Application::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Application::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_customer_id")
                            .from(Application::Table, Application::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_branch_id")
                            .from(Application::Table, Application::BranchId)
                            .to(Branch::Table, Branch::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_processed_by_id")
                            .from(Application::Table, Application::ProcessedById)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Application {
    #[sea_orm(iden = "applications")]
    Table,
    Id,
    ApplicationNumber,
    CustomerId,
    BranchId,
    ItemCategory,
    ItemDescription,
    EstimatedValue,
    LoanAmount,
    InterestRate,
    TermMonths,
    Status,
    Notes,
    ProcessedById,
    ProcessedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
