use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_role_table::Role;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len_uniq(User::Username, 64))
                    .col(string_uniq(User::Email))
                    .col(string(User::HashedPassword))
                    .col(string_null(User::FirstName))
                    .col(string_null(User::LastName))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::IsSuperuser).default(false))
                    .col(integer_null(User::RoleId))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(User::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_id")
                            .from(User::Table, User::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    HashedPassword,
    FirstName,
    LastName,
    IsActive,
    IsSuperuser,
    RoleId,
    CreatedAt,
    UpdatedAt,
}
