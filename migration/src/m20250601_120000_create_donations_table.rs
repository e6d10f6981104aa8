use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donations::Id)
                            .big_integer() // Corresponds to i64
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donations::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Donations::Numbers).json().not_null()) // Sorted array of claimed slots
                    .col(ColumnDef::new(Donations::Method).string_len(16).not_null())
                    .col(ColumnDef::new(Donations::DonorName).text().not_null())
                    .col(ColumnDef::new(Donations::DonorPhone).text().not_null())
                    .col(ColumnDef::new(Donations::DonorAddress).text().not_null())
                    .col(
                        ColumnDef::new(Donations::CreatedAt)
                            .timestamp_with_time_zone() // Corresponds to DateTime<Utc>
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Donations {
    Table,
    Id,
    Amount,
    Numbers,
    Method,
    DonorName,
    DonorPhone,
    DonorAddress,
    CreatedAt,
}
