use sea_orm_migration::prelude::*;

use crate::m20250601_120000_create_donations_table::Donations;

/// One row per claimed slot. The primary key on `number` is what keeps two
/// donations from ever holding the same slot, even under concurrent inserts.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClaimedNumbers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClaimedNumbers::Number)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClaimedNumbers::DonationId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_claimed_numbers_donation")
                            .from(ClaimedNumbers::Table, ClaimedNumbers::DonationId)
                            .to(Donations::Table, Donations::Id)
                            // Deleting a donation out-of-band frees its slots
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClaimedNumbers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClaimedNumbers {
    Table,
    Number,
    DonationId,
}
