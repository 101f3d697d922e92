//! Create `franchise` table.
//!
//! One row per franchise aggregate. The branch/product subtree lives in the
//! `branches` JSONB column and is rewritten on every save.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Franchise::Table)
                    .if_not_exists()
                    .col(string_len(Franchise::Id, 64).primary_key())
                    .col(string_len(Franchise::Name, 256).not_null())
                    .col(json_binary(Franchise::Branches).not_null())
                    .col(timestamp_with_time_zone(Franchise::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Franchise::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Franchise::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Franchise { Table, Id, Name, Branches, CreatedAt, UpdatedAt }
