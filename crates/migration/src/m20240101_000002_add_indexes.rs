use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_franchise_created_at")
                    .table(Franchise::Table)
                    .col(Franchise::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Case-insensitive name lookups. Not unique: renames skip the check.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_franchise_name_lower ON franchise (LOWER(name))",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_franchise_name_lower")
            .await?;
        manager
            .drop_index(Index::drop().name("idx_franchise_created_at").table(Franchise::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Franchise { Table, CreatedAt }
